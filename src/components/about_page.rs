use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{SelectList, SelectListBehavior, SelectListProps};

use super::image_view::{ImageView, ImageViewProps};
use super::theme::{ACCENT_GOLD, TEXT_DIM, TEXT_MAIN, list_style, panel_border};
use super::Component;
use crate::action::Action;
use crate::preview::ImageStatus;
use crate::state::IllustrativeImage;

const ABOUT: [&str; 3] = [
    "Cada carta pertenece a una facción y tiene cuatro atributos: Furia, Magia, Armas y Fuerza.",
    "En la pestaña Cartas puedes buscar por nombre, filtrar por facción y ordenar por cualquier atributo.",
    "A la derecha están el dado de combate y el reglamento del juego.",
];

/// Game description with the illustrative images (dice, rulebook)
pub struct AboutPage {
    list: SelectList,
    /// Preview area from the last render, clickable
    preview_area: Rect,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            preview_area: Rect::default(),
        }
    }
}

pub struct AboutPageProps<'a> {
    pub images: &'a [IllustrativeImage],
    pub selected: usize,
    /// Preview status of the selected image
    pub preview: Option<&'a ImageStatus>,
    pub is_focused: bool,
}

fn render_line(item: &Line<'static>) -> Line<'static> {
    item.clone()
}

fn image_items(images: &[IllustrativeImage]) -> Vec<Line<'static>> {
    images
        .iter()
        .map(|image| Line::from(image.label.clone()))
        .collect()
}

impl Component<Action> for AboutPage {
    type Props<'a> = AboutPageProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.images.is_empty() {
            return Vec::new();
        }
        match event {
            EventKind::Key(key) if key.code == KeyCode::Enter => return vec![Action::AboutOpen],
            EventKind::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self
                        .preview_area
                        .contains(Position::new(mouse.column, mouse.row)) =>
            {
                return vec![Action::AboutOpen];
            }
            _ => {}
        }

        let items = image_items(props.images);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: false,
                wrap_navigation: true,
            },
            on_select: Action::AboutSelect,
            render_item: &render_line,
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [text_area, gallery] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);

        let mut lines = vec![
            Line::styled(
                "Sobre el juego",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        for paragraph in ABOUT {
            lines.push(Line::styled(paragraph, Style::default().fg(TEXT_MAIN)));
            lines.push(Line::default());
        }
        let text = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(false)),
        );
        frame.render_widget(text, text_area);

        let list_height = props.images.len() as u16 + 2;
        let [list_area, preview_area, hint_area] = Layout::vertical([
            Constraint::Length(list_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(gallery);

        let list_block = Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(props.is_focused))
            .title(" Imágenes ");
        let list_inner = list_block.inner(list_area);
        frame.render_widget(list_block, list_area);

        let items = image_items(props.images);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: false,
                wrap_navigation: true,
            },
            on_select: Action::AboutSelect,
            render_item: &render_line,
        };
        self.list.render(frame, list_inner, list_props);

        self.preview_area = preview_area;
        if props.preview.is_some() {
            ImageView.render(frame, preview_area, ImageViewProps { status: props.preview });
        } else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "Enter para ver la imagen",
                    Style::default().fg(TEXT_DIM),
                ))
                .alignment(Alignment::Center),
                preview_area,
            );
        }
        frame.render_widget(
            Paragraph::new(Line::styled(
                "↑/↓ elegir · Enter abrir",
                Style::default().fg(TEXT_DIM),
            )),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::default_illustrative_images;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    #[test]
    fn test_enter_opens_selected_image() {
        let images = default_illustrative_images();
        let mut page = AboutPage::default();
        let actions: Vec<_> = page
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                AboutPageProps {
                    images: &images,
                    selected: 0,
                    preview: None,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::AboutOpen]);
    }

    #[test]
    fn test_render_lists_images() {
        let images = default_illustrative_images();
        let mut render = RenderHarness::new(100, 30);
        let mut page = AboutPage::default();
        let output = render.render_to_string_plain(|frame| {
            page.render(
                frame,
                frame.area(),
                AboutPageProps {
                    images: &images,
                    selected: 1,
                    preview: None,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("Sobre el juego"));
        assert!(output.contains("Dado de combate"));
        assert!(output.contains("Reglamento"));
    }
}
