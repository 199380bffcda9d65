use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::image_view::{ImageView, ImageViewProps};
use super::theme::{ACCENT_GOLD, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::catalog::Card;
use crate::pipeline::{StatReadout, stat_readouts};
use crate::preview::ImageStatus;

/// Rows reserved for the thumbnail inside a tile
pub const THUMBNAIL_ROWS: u16 = 4;

/// One card in the grid: thumbnail, name, faction, number and stats
pub struct CardTile;

pub struct CardTileProps<'a> {
    pub card: &'a Card,
    pub image: Option<&'a ImageStatus>,
    pub is_selected: bool,
}

fn stat_span(readout: &StatReadout) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{:<7}", readout.label), Style::default().fg(TEXT_DIM)),
        Span::styled(
            format!("{:>4}", readout.value),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
    ]
}

fn stat_lines(card: &Card) -> [Line<'static>; 2] {
    let [furia, magia, armas, fuerza] = stat_readouts(&card.stats);
    let pair = |left: &StatReadout, right: &StatReadout| {
        let mut spans = stat_span(left);
        spans.push(Span::raw(" "));
        spans.extend(stat_span(right));
        Line::from(spans)
    };
    [pair(&furia, &magia), pair(&armas, &fuerza)]
}

impl Component<Action> for CardTile {
    type Props<'a> = CardTileProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let card = props.card;
        let (border, bg) = if props.is_selected {
            (Style::default().fg(ACCENT_GOLD), Style::default().bg(BG_HIGHLIGHT))
        } else {
            (Style::default().fg(TEXT_DIM), Style::default())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(bg);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [thumb, name, faction, number, stats] = Layout::vertical([
            Constraint::Length(THUMBNAIL_ROWS),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        ImageView.render(frame, thumb, ImageViewProps { status: props.image });

        let name_style = if props.is_selected {
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(Paragraph::new(Line::styled(card.nombre.clone(), name_style)), name);
        frame.render_widget(
            Paragraph::new(Line::styled(card.grupo.clone(), Style::default().fg(TEXT_DIM))),
            faction,
        );
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("Carta #{}", card.numero),
                Style::default().fg(TEXT_DIM),
            )),
            number,
        );
        frame.render_widget(Paragraph::new(stat_lines(card).to_vec()), stats);
    }
}
