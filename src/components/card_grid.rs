use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};

use super::card_tile::{CardTile, CardTileProps};
use super::theme::{ACCENT, ERROR, TEXT_DIM, TEXT_PLACEHOLDER};
use super::Component;
use crate::action::Action;
use crate::catalog::Card;
use crate::pipeline::{LOAD_ERROR_MESSAGE, NO_RESULTS_MESSAGE, ViewResult};
use crate::state::{AppState, Direction, FocusArea, TILE_HEIGHT, TILE_WIDTH, grid_columns};

/// Grouped card grid: a header per faction followed by rows of tiles
#[derive(Default)]
pub struct CardGrid {
    /// Where the grid was last drawn, for mouse hit-testing
    area: Rect,
}

pub struct CardGridProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// One laid-out row of the grid
#[derive(Debug, PartialEq)]
enum GridRow<'a> {
    Header { faction: &'a str, count: usize },
    /// `start` is the display index of the first card in the row
    Tiles { start: usize, cards: &'a [Card] },
}

impl GridRow<'_> {
    fn height(&self) -> u16 {
        match self {
            GridRow::Header { .. } => 1,
            GridRow::Tiles { .. } => TILE_HEIGHT,
        }
    }

    fn contains(&self, index: usize) -> bool {
        match self {
            GridRow::Header { .. } => false,
            GridRow::Tiles { start, cards } => (*start..start + cards.len()).contains(&index),
        }
    }
}

fn grid_rows(view: &ViewResult, columns: usize) -> Vec<GridRow<'_>> {
    let columns = columns.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    for group in &view.groups {
        rows.push(GridRow::Header {
            faction: &group.faction,
            count: group.cards.len(),
        });
        for chunk in group.cards.chunks(columns) {
            rows.push(GridRow::Tiles {
                start,
                cards: chunk,
            });
            start += chunk.len();
        }
    }
    rows
}

/// First visible row so the selected card's row (and, when it fits, the
/// header above it) is on screen.
fn scroll_start(rows: &[GridRow<'_>], selected: usize, height: u16) -> usize {
    let Some(target) = rows.iter().position(|row| row.contains(selected)) else {
        return 0;
    };
    let bottom: u32 = rows[..=target].iter().map(|row| u32::from(row.height())).sum();
    if bottom <= u32::from(height) {
        return 0;
    }
    let mut first = target;
    let mut used = rows[target].height();
    while first > 0 {
        let above = rows[first - 1].height();
        if used + above > height {
            break;
        }
        used += above;
        first -= 1;
        if matches!(rows[first], GridRow::Header { .. }) {
            break;
        }
    }
    first
}

/// Display index of the tile under (`column`, `row`), using the same layout
/// as the last render.
fn tile_at(view: &ViewResult, selected: usize, area: Rect, column: u16, row: u16) -> Option<usize> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let rows = grid_rows(view, grid_columns(area.width));
    let first = scroll_start(&rows, selected, area.height);
    let mut y = area.y;
    for grid_row in &rows[first..] {
        let height = grid_row.height();
        if y + height > area.y + area.height {
            break;
        }
        if (y..y + height).contains(&row) {
            let GridRow::Tiles { start, cards } = grid_row else {
                return None;
            };
            let offset = usize::from((column - area.x) / TILE_WIDTH);
            return (offset < cards.len()).then_some(start + offset);
        }
        y += height;
    }
    None
}

fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

fn header_line(faction: &str, count: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled("── ", Style::default().fg(TEXT_DIM)),
        Span::styled(
            faction.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({count})"), Style::default().fg(TEXT_DIM)),
    ])
}

impl CardGrid {
    fn render_cards(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = grid_columns(area.width);
        let rows = grid_rows(&state.view, columns);
        let first = scroll_start(&rows, state.selected, area.height);

        let mut y = area.y;
        let bottom = area.y + area.height;
        for row in &rows[first..] {
            if y + row.height() > bottom {
                break;
            }
            match row {
                GridRow::Header { faction, count } => {
                    let line_area = Rect::new(area.x, y, area.width, 1);
                    frame.render_widget(Paragraph::new(header_line(faction, *count)), line_area);
                }
                GridRow::Tiles { start, cards } => {
                    for (offset, card) in cards.iter().enumerate() {
                        let x = area.x + offset as u16 * TILE_WIDTH;
                        let tile_area = Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT).intersection(area);
                        CardTile.render(
                            frame,
                            tile_area,
                            CardTileProps {
                                card,
                                image: state.image_status(&card.image),
                                is_selected: start + offset == state.selected,
                            },
                        );
                    }
                }
            }
            y += row.height();
        }
    }
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let key = match event {
            EventKind::Key(key) => key,
            EventKind::Scroll { delta, .. } if *delta > 0 => {
                return vec![Action::CardMove(Direction::Down)];
            }
            EventKind::Scroll { delta, .. } if *delta < 0 => {
                return vec![Action::CardMove(Direction::Up)];
            }
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let state = props.state;
                return tile_at(&state.view, state.selected, self.area, mouse.column, mouse.row)
                    .map(|index| vec![Action::CardSelect(index), Action::CardOpen])
                    .unwrap_or_default();
            }
            _ => return Vec::new(),
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => Action::CardMove(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Action::CardMove(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => Action::CardMove(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Action::CardMove(Direction::Down),
            KeyCode::Enter => Action::CardOpen,
            KeyCode::Char('/') => Action::UiFocus(FocusArea::NameInput),
            KeyCode::Char('f') => Action::FilterFactionCycle(1),
            KeyCode::Char('F') => Action::FilterFactionCycle(-1),
            KeyCode::Char('c') => Action::FilterFactionSet(None),
            KeyCode::Char('s') => Action::SortCycle(1),
            KeyCode::Char('S') => Action::SortCycle(-1),
            _ => return Vec::new(),
        };
        vec![action]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;
        let state = props.state;
        match &state.catalog {
            DataResource::Failed(error) => render_message(
                frame,
                area,
                vec![
                    Line::styled(
                        LOAD_ERROR_MESSAGE,
                        Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(error.clone(), Style::default().fg(TEXT_DIM)),
                ],
            ),
            DataResource::Loaded(_) if state.view.is_empty() => render_message(
                frame,
                area,
                vec![Line::styled(
                    NO_RESULTS_MESSAGE,
                    Style::default().fg(TEXT_PLACEHOLDER),
                )],
            ),
            DataResource::Loaded(_) => self.render_cards(frame, area, state),
            _ => render_message(
                frame,
                area,
                vec![Line::styled("Cargando cartas...", Style::default().fg(TEXT_DIM))],
            ),
        }
    }
}
