//! Actions: every input event and async result the reducer understands

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::pipeline::SortKey;
use crate::preview::ImagePreview;
use crate::state::{Direction, FocusArea, Page};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Catalog category =====
    /// Intent: read the catalog file (sent once at startup)
    CatalogFetch,

    /// Result: catalog parsed
    CatalogDidLoad(Catalog),

    /// Result: catalog missing or malformed
    CatalogDidError(String),

    // ===== Filter category =====
    /// Name query edited (every keystroke)
    FilterNameChange(String),

    /// Name query confirmed; focus goes back to the grid
    FilterNameSubmit(String),

    /// Select the next/previous faction (wrapping through "all")
    FilterFactionCycle(i32),

    /// Set the faction constraint directly
    FilterFactionSet(Option<String>),

    // ===== Sort category =====
    SortCycle(i32),

    SortSet(Option<SortKey>),

    // ===== Card category =====
    /// Move the grid selection
    CardMove(Direction),

    /// Select a card by display index
    CardSelect(usize),

    /// Open the card overlay for the selected card
    CardOpen,

    CardClose,

    // ===== Image category =====
    /// Open the image overlay for an asset path
    ImageOpen(String),

    ImageClose,

    /// Result: preview decoded
    ImageDidLoad { path: String, preview: ImagePreview },

    /// Result: preview unavailable
    ImageDidError { path: String, error: String },

    // ===== Nav category =====
    NavSelect(Page),

    NavCycle(i32),

    // ===== About category =====
    AboutSelect(usize),

    /// Open the selected illustrative image
    AboutOpen,

    // ===== UI category =====
    UiFocus(FocusArea),

    UiTerminalResize(u16, u16),

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    Quit,
}
