use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_GOLD, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::Page;

const BRAND: &str = " ♠ Cartas ";
const SEPARATOR: &str = "│";

/// Top navigation: brand plus one tab per page
#[derive(Default)]
pub struct NavBar {
    area: Rect,
}

pub struct NavBarProps {
    pub page: Page,
}

fn tab_label(page: Page) -> String {
    format!(" {} {} ", page.index() + 1, page.title())
}

fn text_width(text: &str) -> u16 {
    Span::raw(text).width() as u16
}

/// Horizontal span (start column offset, width) of each tab
fn tab_spans() -> Vec<(Page, u16, u16)> {
    let mut x = text_width(BRAND) + text_width(SEPARATOR);
    Page::ALL
        .iter()
        .map(|&page| {
            let width = text_width(&tab_label(page));
            let span = (page, x, width);
            x += width + text_width(SEPARATOR);
            span
        })
        .collect()
}

impl Component<Action> for NavBar {
    type Props<'a> = NavBarProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Mouse(mouse) = event else {
            return None;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || !self.area.contains(Position::new(mouse.column, mouse.row))
        {
            return None;
        }
        let offset = mouse.column - self.area.x;
        tab_spans()
            .into_iter()
            .find(|&(_, start, width)| (start..start + width).contains(&offset))
            .map(|(page, _, _)| Action::NavSelect(page))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;
        let dim = Style::default().fg(TEXT_DIM);
        let mut spans = vec![
            Span::styled(
                BRAND,
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(SEPARATOR, dim),
        ];
        for page in Page::ALL {
            let style = if page == props.page {
                Style::default()
                    .fg(TEXT_MAIN)
                    .bg(BG_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                dim
            };
            spans.push(Span::styled(tab_label(page), style));
            spans.push(Span::styled(SEPARATOR, dim));
        }
        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_PANEL));
        frame.render_widget(bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use tui_dispatch::testing::*;

    #[test]
    fn test_render_marks_pages() {
        let mut render = RenderHarness::new(80, 1);
        let mut nav = NavBar::default();
        let output = render.render_to_string_plain(|frame| {
            nav.render(frame, frame.area(), NavBarProps { page: Page::Sobre });
        });
        assert!(output.contains("1 Inicio"));
        assert!(output.contains("2 Cartas"));
        assert!(output.contains("3 Sobre el juego"));
    }

    #[test]
    fn test_click_selects_tab() {
        let mut nav = NavBar {
            area: Rect::new(0, 0, 80, 1),
        };
        let (page, start, _) = tab_spans()[1];
        let click = EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: start + 1,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        let actions: Vec<_> = nav
            .handle_event(&click, NavBarProps { page: Page::Inicio })
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::NavSelect(page)]);
        assert_eq!(page, Page::Catalogo);
    }
}
