//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::resolve_asset;
use crate::effect::Effect;
use crate::pipeline::{ViewResult, cycle_sort};
use crate::preview::ImageStatus;
use crate::state::{AppState, Direction, FocusArea};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Catalog actions =====
        Action::CatalogFetch => {
            // The catalog is read once; later fetches are ignored.
            if !state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            state.catalog = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadCatalog {
                path: resolve_asset(&state.asset_root, &state.catalog_path),
            })
        }

        Action::CatalogDidLoad(catalog) => {
            let paths: Vec<String> = catalog
                .image_paths()
                .into_iter()
                .map(str::to_string)
                .collect();
            state.catalog = DataResource::Loaded(catalog);
            state.apply_filters();
            let effects = paths
                .iter()
                .filter_map(|path| request_image(state, path))
                .collect();
            DispatchResult::changed_with_many(effects)
        }

        Action::CatalogDidError(msg) => {
            state.catalog = DataResource::Failed(msg);
            state.apply_filters();
            DispatchResult::changed()
        }

        // ===== Filter actions =====
        Action::FilterNameChange(name) => {
            state.filter.name = name;
            state.apply_filters();
            DispatchResult::changed()
        }

        Action::FilterNameSubmit(name) => {
            state.filter.name = name;
            state.focus = FocusArea::Grid;
            state.apply_filters();
            DispatchResult::changed()
        }

        Action::FilterFactionCycle(step) => {
            state.filter.faction =
                cycle_faction(state.factions(), state.filter.faction.as_deref(), step);
            state.apply_filters();
            DispatchResult::changed()
        }

        Action::FilterFactionSet(faction) => {
            state.filter.faction = faction.filter(|f| !f.is_empty());
            state.apply_filters();
            DispatchResult::changed()
        }

        // ===== Sort actions =====
        Action::SortCycle(step) => {
            state.sort_key = cycle_sort(state.sort_key, step);
            state.apply_filters();
            DispatchResult::changed()
        }

        Action::SortSet(key) => {
            state.sort_key = key;
            state.apply_filters();
            DispatchResult::changed()
        }

        // ===== Card actions =====
        Action::CardMove(direction) => {
            let next = move_selection(&state.view, state.selected, direction, state.grid_columns());
            if next == state.selected {
                DispatchResult::unchanged()
            } else {
                state.selected = next;
                DispatchResult::changed()
            }
        }

        Action::CardSelect(index) => {
            if index < state.view.total && index != state.selected {
                state.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CardOpen => open_card(state),

        Action::CardClose => {
            if state.card_modal.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Image actions =====
        Action::ImageOpen(path) => open_image(state, path),

        Action::ImageClose => {
            if state.image_modal.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ImageDidLoad { path, preview } => {
            state.images.insert(path, ImageStatus::Ready(preview));
            DispatchResult::changed()
        }

        Action::ImageDidError { path, error } => {
            state.images.insert(path, ImageStatus::Unavailable(error));
            DispatchResult::changed()
        }

        // ===== Nav actions =====
        Action::NavSelect(page) => {
            if page == state.page {
                return DispatchResult::unchanged();
            }
            state.page = page;
            state.focus = FocusArea::Grid;
            DispatchResult::changed()
        }

        Action::NavCycle(step) => {
            state.page = state.page.cycle(step);
            state.focus = FocusArea::Grid;
            DispatchResult::changed()
        }

        // ===== About actions =====
        Action::AboutSelect(index) => {
            if index < state.about_images.len() && index != state.about_selected {
                state.about_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::AboutOpen => {
            let Some(image) = state.about_images.get(state.about_selected) else {
                return DispatchResult::unchanged();
            };
            let path = image.path.clone();
            open_image(state, path)
        }

        // ===== UI actions =====
        Action::UiFocus(focus) => {
            if focus == state.focus {
                DispatchResult::unchanged()
            } else {
                state.focus = focus;
                DispatchResult::changed()
            }
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn open_card(state: &mut AppState) -> DispatchResult<Effect> {
    let Some(card) = state.selected_card().cloned() else {
        return DispatchResult::unchanged();
    };
    let effect = request_image(state, &card.image);
    state.card_modal = Some(card);
    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

fn open_image(state: &mut AppState, path: String) -> DispatchResult<Effect> {
    let effect = request_image(state, &path);
    state.image_modal = Some(path);
    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

/// Mark `path` as loading and return the load effect, unless it is already
/// cached or in flight.
fn request_image(state: &mut AppState, path: &str) -> Option<Effect> {
    if state.images.contains_key(path) {
        return None;
    }
    if path.is_empty() {
        state
            .images
            .insert(String::new(), ImageStatus::Unavailable("sin ruta".into()));
        return None;
    }
    state.images.insert(path.to_string(), ImageStatus::Loading);
    Some(Effect::LoadImage {
        key: path.to_string(),
        path: resolve_asset(&state.asset_root, path),
    })
}

/// Step through `None` followed by the catalog's factions, wrapping around.
fn cycle_faction(factions: &[String], current: Option<&str>, step: i32) -> Option<String> {
    let len = factions.len() as i32 + 1;
    let index = current
        .and_then(|name| factions.iter().position(|f| f == name))
        .map_or(0, |i| i as i32 + 1);
    let next = (index + step).rem_euclid(len);
    if next == 0 {
        None
    } else {
        factions.get((next - 1) as usize).cloned()
    }
}

/// Move through the grouped grid. Each faction section starts a new row, so
/// vertical moves hop between sections keeping the column where possible.
fn move_selection(
    view: &ViewResult,
    selected: usize,
    direction: Direction,
    columns: usize,
) -> usize {
    let Some((section, pos)) = view.position(selected) else {
        return 0;
    };
    let columns = columns.max(1);
    let len = view.groups[section].cards.len();
    match direction {
        Direction::Left => selected.saturating_sub(1),
        Direction::Right => (selected + 1).min(view.total.saturating_sub(1)),
        Direction::Down => {
            if pos + columns < len {
                selected + columns
            } else if pos / columns < (len - 1) / columns {
                view.index_of(section, len - 1)
            } else if section + 1 < view.groups.len() {
                let next_len = view.groups[section + 1].cards.len();
                view.index_of(section + 1, (pos % columns).min(next_len - 1))
            } else {
                selected
            }
        }
        Direction::Up => {
            if pos >= columns {
                selected - columns
            } else if section > 0 {
                let prev_len = view.groups[section - 1].cards.len();
                let last_row = (prev_len - 1) / columns * columns;
                view.index_of(section - 1, (last_row + pos % columns).min(prev_len - 1))
            } else {
                selected
            }
        }
    }
}
