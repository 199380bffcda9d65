use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{Modal, ModalBehavior, ModalProps, centered_rect};

use super::image_view::{ImageView, ImageViewProps};
use super::theme::{ACCENT_GOLD, TEXT_DIM, TEXT_MAIN, modal_style};
use super::Component;
use crate::action::Action;
use crate::catalog::Card;
use crate::pipeline::stat_readouts;
use crate::preview::ImageStatus;

/// Enlarged view of one card over a dimmed backdrop
pub struct CardModal {
    modal: Modal,
}

impl Default for CardModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

pub struct CardModalProps<'a> {
    pub card: &'a Card,
    pub image: Option<&'a ImageStatus>,
    /// Full terminal area; the modal centers itself inside it
    pub screen: Rect,
    pub is_focused: bool,
}

pub fn card_modal_area(screen: Rect) -> Rect {
    centered_rect(
        screen.width.saturating_sub(4).min(64),
        screen.height.saturating_sub(2).min(30),
        screen,
    )
}

fn card_close() -> Action {
    Action::CardClose
}

fn stats_line(card: &Card) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, readout) in stat_readouts(&card.stats).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(TEXT_DIM)));
        }
        spans.push(Span::styled(
            format!("{} ", readout.label),
            Style::default().fg(TEXT_DIM),
        ));
        spans.push(Span::styled(
            readout.value,
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans).centered()
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, image: Option<&ImageStatus>) {
    let [title, subtitle, _, picture, _, stats, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(
            Line::styled(
                card.nombre.clone(),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            )
            .centered(),
        ),
        title,
    );
    frame.render_widget(
        Paragraph::new(
            Line::styled(
                format!("{}  ·  Carta #{}", card.grupo, card.numero),
                Style::default().fg(TEXT_DIM),
            )
            .centered(),
        ),
        subtitle,
    );
    ImageView.render(frame, picture, ImageViewProps { status: image });
    frame.render_widget(Paragraph::new(stats_line(card)), stats);
    frame.render_widget(
        Paragraph::new(Line::styled("x / Esc cerrar", Style::default().fg(TEXT_DIM)).centered()),
        hint,
    );
}

impl Component<Action> for CardModal {
    type Props<'a> = CardModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Char('x') {
                return vec![Action::CardClose];
            }
        }

        let mut noop_render = |_frame: &mut Frame, _area: Rect| {};
        let modal_props = ModalProps {
            is_open: true,
            is_focused: true,
            area: card_modal_area(props.screen),
            style: modal_style(),
            behavior: ModalBehavior {
                close_on_esc: true,
                close_on_backdrop: true,
            },
            on_close: card_close,
            render_content: &mut noop_render,
        };
        self.modal.handle_event(event, modal_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let card = props.card;
        let image = props.image;
        let mut render_content = |frame: &mut Frame, content: Rect| {
            render_card(frame, content, card, image);
        };
        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: card_modal_area(props.screen),
                style: modal_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: true,
                },
                on_close: card_close,
                render_content: &mut render_content,
            },
        );
    }
}
