//! Card records and the catalog loader

use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The four card metrics. All of them are required in the data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stats {
    pub furia: u32,
    pub magia: u32,
    pub armas: u32,
    pub fuerza: u32,
}

/// One catalog entry, as stored in `cards.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Card {
    pub numero: u32,
    pub nombre: String,
    pub grupo: String,
    pub image: String,
    pub stats: Stats,
}

/// The full card collection, fixed once loaded.
///
/// Besides the cards themselves the catalog remembers the order in which each
/// faction first appears. Faction sections are always displayed in that order,
/// whatever filter or sort is active.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    cards: Vec<Card>,
    factions: Vec<String>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut factions: Vec<String> = Vec::new();
        for card in &cards {
            if !factions.iter().any(|f| f == &card.grupo) {
                factions.push(card.grupo.clone());
            }
        }
        Self { cards, factions }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Ok(Self::new(cards))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Distinct factions in first-appearance order
    pub fn factions(&self) -> &[String] {
        &self.factions
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Distinct image paths, in catalog order
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for card in &self.cards {
            if !card.image.is_empty() && !paths.contains(&card.image.as_str()) {
                paths.push(&card.image);
            }
        }
        paths
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolve an asset path (catalog file or card image) against the asset root.
pub fn resolve_asset(root: &str, relative: &str) -> PathBuf {
    let relative = Path::new(relative);
    if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        Path::new(root).join(relative)
    }
}

/// Read and parse the catalog file. Called exactly once at startup.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        });
    let result = json.and_then(|json| {
        Catalog::from_json(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    });

    match &result {
        Ok(catalog) => tracing::info!(
            path = %path.display(),
            cards = catalog.len(),
            factions = catalog.factions().len(),
            "catalog loaded"
        ),
        Err(error) => tracing::error!(%error, "error loading catalog"),
    }
    result
}
