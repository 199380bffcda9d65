//! Application state - single source of truth

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::catalog::{Card, Catalog};
use crate::pipeline::{FilterState, SortKey, ViewResult};
use crate::preview::ImageStatus;

pub const DEFAULT_CATALOG_PATH: &str = "data/cards.json";

/// Width and height of one card tile, borders included
pub const TILE_WIDTH: u16 = 26;
pub const TILE_HEIGHT: u16 = 11;

/// Top-level pages; exactly one is shown at a time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Page {
    #[default]
    Inicio,
    Catalogo,
    Sobre,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Inicio, Page::Catalogo, Page::Sobre];

    pub fn title(self) -> &'static str {
        match self {
            Page::Inicio => "Inicio",
            Page::Catalogo => "Cartas",
            Page::Sobre => "Sobre el juego",
        }
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn cycle(self, step: i32) -> Page {
        let len = Page::ALL.len() as i32;
        Page::ALL[(self.index() as i32 + step).rem_euclid(len) as usize]
    }
}

/// Which part of the catalog page receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FocusArea {
    #[default]
    Grid,
    NameInput,
}

/// Selection moves on the card grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// An image shown on the about page that opens in the image overlay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IllustrativeImage {
    pub label: String,
    pub path: String,
}

pub fn default_illustrative_images() -> Vec<IllustrativeImage> {
    vec![
        IllustrativeImage {
            label: "Dado de combate".into(),
            path: "img/dado.png".into(),
        },
        IllustrativeImage {
            label: "Reglamento".into(),
            path: "img/reglas.png".into(),
        },
    ]
}

/// Columns of tiles that fit in `width` cells
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / TILE_WIDTH).max(1))
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Configuration ---
    /// Directory the catalog and image paths are resolved against
    #[debug(section = "Config", label = "Assets")]
    pub asset_root: String,

    #[debug(section = "Config", label = "Catalog")]
    pub catalog_path: String,

    // --- Catalog data ---
    /// Loaded once at startup: Empty → Loading → Loaded/Failed
    #[debug(section = "Catalog", label = "Data", debug_fmt)]
    pub catalog: DataResource<Catalog>,

    #[debug(section = "Catalog", label = "Filter", debug_fmt)]
    pub filter: FilterState,

    #[debug(section = "Catalog", label = "Sort", debug_fmt)]
    pub sort_key: Option<SortKey>,

    /// Derived from catalog + filter + sort, rebuilt on every change
    #[debug(skip)]
    pub view: ViewResult,

    /// Index into the view's display order
    #[debug(section = "Catalog", label = "Selected")]
    pub selected: usize,

    // --- Navigation and overlays ---
    #[debug(section = "UI", label = "Page", debug_fmt)]
    pub page: Page,

    #[debug(section = "UI", label = "Focus", debug_fmt)]
    pub focus: FocusArea,

    #[debug(section = "UI", label = "Card modal", debug_fmt)]
    pub card_modal: Option<Card>,

    #[debug(section = "UI", label = "Image modal", debug_fmt)]
    pub image_modal: Option<String>,

    #[debug(skip)]
    pub about_images: Vec<IllustrativeImage>,

    #[debug(section = "UI", label = "About selection")]
    pub about_selected: usize,

    #[debug(skip)]
    pub terminal_size: (u16, u16),

    // --- Image cache (skipped) ---
    #[debug(skip)]
    pub images: HashMap<String, ImageStatus>,
}

impl AppState {
    pub fn new(asset_root: impl Into<String>, catalog_path: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
            catalog_path: catalog_path.into(),
            catalog: DataResource::Empty,
            filter: FilterState::default(),
            sort_key: None,
            view: ViewResult::default(),
            selected: 0,
            page: Page::default(),
            focus: FocusArea::default(),
            card_modal: None,
            image_modal: None,
            about_images: default_illustrative_images(),
            about_selected: 0,
            terminal_size: (80, 24),
            images: HashMap::new(),
        }
    }

    /// Rebuild the view from the catalog, filter and sort key.
    ///
    /// Every filter, faction or sort change goes through here. The selection
    /// is reset to the first card.
    pub fn apply_filters(&mut self) {
        self.view = match self.catalog.data() {
            Some(catalog) => ViewResult::compute(catalog, &self.filter, self.sort_key),
            None => ViewResult::default(),
        };
        self.selected = 0;
    }

    /// Result count readout. Blank until the catalog has loaded, so neither
    /// the loading message nor the error banner is paired with a count.
    pub fn result_summary(&self) -> String {
        if self.catalog.is_loaded() {
            self.view.summary()
        } else {
            String::new()
        }
    }

    pub fn factions(&self) -> &[String] {
        self.catalog.data().map(Catalog::factions).unwrap_or_default()
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.view.card_at(self.selected)
    }

    pub fn image_status(&self, path: &str) -> Option<&ImageStatus> {
        self.images.get(path)
    }

    pub fn grid_columns(&self) -> usize {
        grid_columns(self.terminal_size.0.saturating_sub(2))
    }

    pub fn modal_open(&self) -> bool {
        self.card_modal.is_some() || self.image_modal.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(".", DEFAULT_CATALOG_PATH)
    }
}
