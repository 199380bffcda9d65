use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{TextInput, TextInputProps};

use super::theme::{ACCENT_GOLD, TEXT_DIM, TEXT_MAIN, input_style, panel_border};
use super::Component;
use crate::action::Action;
use crate::pipeline::{FilterState, SortKey, sort_label};
use crate::state::FocusArea;

const NAME_PLACEHOLDER: &str = "Buscar por nombre...";
const ALL_FACTIONS: &str = "Todas";

/// Name input plus the faction, order and result-count readouts
pub struct FilterBar {
    input: TextInput,
}

pub struct FilterBarProps<'a> {
    pub filter: &'a FilterState,
    pub sort_key: Option<SortKey>,
    pub summary: &'a str,
    /// The name input has keyboard focus
    pub is_focused: bool,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ui_render(_: usize) -> Action {
    Action::Render
}

fn readout<'a>(key: &'a str, label: &'a str, value: &'a str) -> Paragraph<'a> {
    let line = Line::from(vec![
        Span::styled(key, Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {label}: "), Style::default().fg(TEXT_DIM)),
        Span::styled(value, Style::default().fg(TEXT_MAIN)),
    ]);
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(false)),
    )
}

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc {
                return vec![Action::UiFocus(FocusArea::Grid)];
            }
        }

        let input_props = TextInputProps {
            value: &props.filter.name,
            placeholder: NAME_PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: Action::FilterNameChange,
            on_submit: Action::FilterNameSubmit,
            on_cursor_move: Some(ui_render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [name_area, faction_area, sort_area, summary_area] = Layout::horizontal([
            Constraint::Min(24),
            Constraint::Length(26),
            Constraint::Length(30),
            Constraint::Length(26),
        ])
        .areas(area);

        let name_block = Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(props.is_focused))
            .title(" / Nombre ");
        let inner = name_block.inner(name_area);
        frame.render_widget(name_block, name_area);
        let input_props = TextInputProps {
            value: &props.filter.name,
            placeholder: NAME_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::FilterNameChange,
            on_submit: Action::FilterNameSubmit,
            on_cursor_move: Some(ui_render),
        };
        self.input.render(frame, inner, input_props);

        let faction = props.filter.faction.as_deref().unwrap_or(ALL_FACTIONS);
        frame.render_widget(readout("f", "Facción", faction), faction_area);
        frame.render_widget(readout("s", "Orden", sort_label(props.sort_key)), sort_area);

        let summary = Paragraph::new(Line::styled(
            props.summary,
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(false)),
        );
        frame.render_widget(summary, summary_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props<'a>(filter: &'a FilterState, is_focused: bool) -> FilterBarProps<'a> {
        FilterBarProps {
            filter,
            sort_key: Some(SortKey::Furia),
            summary: "2 cartas encontradas",
            is_focused,
        }
    }

    #[test]
    fn test_typing_emits_name_change() {
        let filter = FilterState::default();
        let mut bar = FilterBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props(&filter, true))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::FilterNameChange("a".into())]);
    }

    #[test]
    fn test_escape_returns_focus_to_grid() {
        let filter = FilterState::default();
        let mut bar = FilterBar::new();
        let esc = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let actions: Vec<_> = bar.handle_event(&esc, props(&filter, true)).into_iter().collect();
        assert_eq!(actions, vec![Action::UiFocus(FocusArea::Grid)]);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let filter = FilterState::default();
        let mut bar = FilterBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props(&filter, false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_shows_readouts() {
        let filter = FilterState {
            name: String::new(),
            faction: Some("Fuego".into()),
        };
        let mut render = RenderHarness::new(120, 3);
        let mut bar = FilterBar::new();
        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props(&filter, false));
        });
        assert!(output.contains("Fuego"));
        assert!(output.contains("Furia"));
        assert!(output.contains("2 cartas encontradas"));
    }
}
