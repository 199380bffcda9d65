use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{Modal, ModalBehavior, ModalProps, centered_rect};

use super::image_view::{ImageView, ImageViewProps};
use super::theme::{ACCENT_GOLD, TEXT_DIM, modal_style};
use super::Component;
use crate::action::Action;
use crate::preview::ImageStatus;

/// Full-size view of a single image asset
pub struct ImageModal {
    modal: Modal,
}

impl Default for ImageModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

pub struct ImageModalProps<'a> {
    pub title: &'a str,
    pub image: Option<&'a ImageStatus>,
    pub screen: Rect,
    pub is_focused: bool,
}

pub fn image_modal_area(screen: Rect) -> Rect {
    centered_rect(
        screen.width.saturating_sub(4).min(96),
        screen.height.saturating_sub(2).min(40),
        screen,
    )
}

fn image_close() -> Action {
    Action::ImageClose
}

impl Component<Action> for ImageModal {
    type Props<'a> = ImageModalProps<'a>;

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
                return vec![Action::ImageClose];
            }
        }

        let mut noop_render = |_frame: &mut Frame, _area: Rect| {};
        let modal_props = ModalProps {
            is_open: true,
            is_focused: true,
            area: image_modal_area(props.screen),
            style: modal_style(),
            behavior: ModalBehavior {
                close_on_esc: true,
                close_on_backdrop: true,
            },
            on_close: image_close,
            render_content: &mut noop_render,
        };
        self.modal.handle_event(event, modal_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = props.title;
        let image = props.image;
        let mut render_content = |frame: &mut Frame, content: Rect| {
            let [title_area, picture, hint] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .areas(content);
            frame.render_widget(
                Paragraph::new(
                    Line::styled(
                        title.to_string(),
                        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                    )
                    .centered(),
                ),
                title_area,
            );
            ImageView.render(frame, picture, ImageViewProps { status: image });
            frame.render_widget(
                Paragraph::new(
                    Line::styled("x / Esc cerrar", Style::default().fg(TEXT_DIM)).centered(),
                ),
                hint,
            );
        };
        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: image_modal_area(props.screen),
                style: modal_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: true,
                },
                on_close: image_close,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    #[test]
    fn test_close_on_x_and_esc() {
        let mut modal = ImageModal::default();
        for code in [KeyCode::Char('x'), KeyCode::Esc] {
            let actions: Vec<_> = modal
                .handle_event(
                    &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                    ImageModalProps {
                        title: "Reglamento",
                        image: None,
                        screen: Rect::new(0, 0, 80, 24),
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            assert_eq!(actions, vec![Action::ImageClose]);
        }
    }

    #[test]
    fn test_failed_image_shows_placeholder() {
        let status = ImageStatus::Unavailable("not found".into());
        let mut render = RenderHarness::new(80, 24);
        let mut modal = ImageModal::default();
        let output = render.render_to_string_plain(|frame| {
            let screen = frame.area();
            modal.render(
                frame,
                screen,
                ImageModalProps {
                    title: "Reglamento",
                    image: Some(&status),
                    screen,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("Reglamento"));
        assert!(output.contains("Imagen no disponible"));
    }
}
