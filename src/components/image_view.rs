use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

use super::theme::{BG_IMAGE, TEXT_DIM, TEXT_PLACEHOLDER};
use super::Component;
use crate::action::Action;
use crate::preview::{IMAGE_UNAVAILABLE, ImagePreview, ImageStatus};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Paints an image preview, or the placeholder when it is unavailable
pub struct ImageView;

pub struct ImageViewProps<'a> {
    pub status: Option<&'a ImageStatus>,
}

impl Component<Action> for ImageView {
    type Props<'a> = ImageViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match props.status {
            Some(ImageStatus::Ready(preview)) => paint_preview(frame, area, preview),
            Some(ImageStatus::Unavailable(_)) => render_placeholder(frame, area),
            Some(ImageStatus::Loading) | None => {
                render_centered(frame, area, "Cargando imagen...", TEXT_DIM)
            }
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn paint_preview(frame: &mut Frame, area: Rect, preview: &ImagePreview) {
    let (cols, px_rows) = preview.fit(area.width, area.height);
    if cols == 0 || px_rows == 0 {
        return;
    }
    let rows = px_rows.div_ceil(2);
    let x0 = area.x + (area.width - cols) / 2;
    let y0 = area.y + (area.height.saturating_sub(rows)) / 2;
    let (cols32, px_rows32) = (u32::from(cols), u32::from(px_rows));

    let buf = frame.buffer_mut();
    for row in 0..rows {
        let top_y = u32::from(row) * 2;
        for col in 0..cols {
            let top = preview.sample(u32::from(col), top_y, cols32, px_rows32);
            let bottom = if top_y + 1 < px_rows32 {
                rgb(preview.sample(u32::from(col), top_y + 1, cols32, px_rows32))
            } else {
                BG_IMAGE
            };
            if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                cell.set_char(HALF_BLOCK).set_fg(rgb(top)).set_bg(bottom);
            }
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_IMAGE)), area);
    render_centered(frame, area, IMAGE_UNAVAILABLE, TEXT_PLACEHOLDER);
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, middle);
}
