//! Filter → sort → group pipeline and the text the catalog page shows.
//!
//! Everything here is a pure function of the catalog, the filter and the
//! sort key. The view is rebuilt from scratch on every change.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{Card, Catalog, Stats};
use crate::collate::{self, CollationKey};
use crate::normalize::normalize;

pub const NO_RESULTS_STATUS: &str = "No hay resultados";
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron cartas con los filtros seleccionados.";
pub const LOAD_ERROR_MESSAGE: &str =
    "Error al cargar las cartas. Verifica la ruta del archivo JSON.";

/// Current name query and faction selection
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterState {
    pub name: String,
    /// `None` means every faction
    pub faction: Option<String>,
}

impl FilterState {
    fn faction_constraint(&self) -> Option<&str> {
        self.faction.as_deref().filter(|f| !f.is_empty())
    }
}

/// Attribute the filtered cards are ordered by
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Numero,
    Nombre,
    Furia,
    Magia,
    Armas,
    Fuerza,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Numero,
        SortKey::Nombre,
        SortKey::Furia,
        SortKey::Magia,
        SortKey::Armas,
        SortKey::Fuerza,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Numero => "Número",
            SortKey::Nombre => "Nombre",
            SortKey::Furia => "Furia",
            SortKey::Magia => "Magia",
            SortKey::Armas => "Armas",
            SortKey::Fuerza => "Fuerza",
        }
    }

    /// Numbers ascend, names follow Spanish collation, stats descend.
    pub fn compare(self, a: &Card, b: &Card) -> Ordering {
        match self {
            SortKey::Numero => a.numero.cmp(&b.numero),
            SortKey::Nombre => collate::compare(&a.nombre, &b.nombre),
            SortKey::Furia => b.stats.furia.cmp(&a.stats.furia),
            SortKey::Magia => b.stats.magia.cmp(&a.stats.magia),
            SortKey::Armas => b.stats.armas.cmp(&a.stats.armas),
            SortKey::Fuerza => b.stats.fuerza.cmp(&a.stats.fuerza),
        }
    }
}

/// Label for an optional sort, `None` being catalog order
pub fn sort_label(key: Option<SortKey>) -> &'static str {
    key.map_or("Orden del catálogo", SortKey::label)
}

/// Step through `None, Numero, ..., Fuerza` and wrap around.
pub fn cycle_sort(current: Option<SortKey>, step: i32) -> Option<SortKey> {
    let len = SortKey::ALL.len() as i32 + 1;
    let index = match current {
        None => 0,
        Some(key) => SortKey::ALL.iter().position(|k| *k == key).unwrap_or(0) as i32 + 1,
    };
    let next = (index + step).rem_euclid(len);
    if next == 0 {
        None
    } else {
        Some(SortKey::ALL[(next - 1) as usize])
    }
}

/// Cards matching both the name query and the faction, in catalog order
pub fn filter<'a>(cards: &'a [Card], state: &FilterState) -> Vec<&'a Card> {
    let query = normalize(&state.name);
    let faction = state.faction_constraint();
    cards
        .iter()
        .filter(|card| {
            let matches_name = query.is_empty() || normalize(&card.nombre).contains(&query);
            let matches_faction = faction.map_or(true, |f| card.grupo == f);
            matches_name && matches_faction
        })
        .collect()
}

/// Stable sort; `None` leaves the order untouched.
pub fn sort<'a>(mut cards: Vec<&'a Card>, key: Option<SortKey>) -> Vec<&'a Card> {
    match key {
        None => {}
        Some(SortKey::Nombre) => cards.sort_by_cached_key(|card| CollationKey::new(&card.nombre)),
        Some(key) => cards.sort_by(|a, b| key.compare(a, b)),
    }
    cards
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactionGroup<'a> {
    pub faction: &'a str,
    pub cards: Vec<&'a Card>,
}

/// Partition `cards` by faction in the catalog's first-appearance order.
/// Factions without cards are left out.
pub fn group<'a>(cards: &[&'a Card], catalog: &'a Catalog) -> Vec<FactionGroup<'a>> {
    catalog
        .factions()
        .iter()
        .filter_map(|faction| {
            let members: Vec<&Card> = cards
                .iter()
                .copied()
                .filter(|card| &card.grupo == faction)
                .collect();
            (!members.is_empty()).then_some(FactionGroup {
                faction: faction.as_str(),
                cards: members,
            })
        })
        .collect()
}

/// One faction section of the rendered catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViewGroup {
    pub faction: String,
    pub cards: Vec<Card>,
}

/// The filtered, sorted and grouped catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViewResult {
    pub groups: Vec<ViewGroup>,
    pub total: usize,
}

impl ViewResult {
    pub fn compute(catalog: &Catalog, filter_state: &FilterState, key: Option<SortKey>) -> Self {
        let matched = sort(filter(catalog.cards(), filter_state), key);
        let groups: Vec<ViewGroup> = group(&matched, catalog)
            .into_iter()
            .map(|g| ViewGroup {
                faction: g.faction.to_string(),
                cards: g.cards.into_iter().cloned().collect(),
            })
            .collect();
        tracing::debug!(
            name = %filter_state.name,
            faction = ?filter_state.faction,
            sort = ?key,
            total = matched.len(),
            "view recomputed"
        );
        Self {
            groups,
            total: matched.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn summary(&self) -> String {
        summary_text(self.total)
    }

    /// Cards in display order (section by section)
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.groups.iter().flat_map(|g| g.cards.iter())
    }

    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.cards().nth(index)
    }

    /// Display index → (section, position within the section)
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (section, group) in self.groups.iter().enumerate() {
            if remaining < group.cards.len() {
                return Some((section, remaining));
            }
            remaining -= group.cards.len();
        }
        None
    }

    /// (section, position) → display index
    pub fn index_of(&self, section: usize, position: usize) -> usize {
        self.groups
            .iter()
            .take(section)
            .map(|g| g.cards.len())
            .sum::<usize>()
            + position
    }
}

/// Result count line, with Spanish singular/plural
pub fn summary_text(count: usize) -> String {
    match count {
        0 => NO_RESULTS_STATUS.to_string(),
        1 => "1 carta encontrada".to_string(),
        n => format!("{n} cartas encontradas"),
    }
}

/// `5000` → `"5k"`, rounding half up
pub fn format_thousands(value: u32) -> String {
    format!("{}k", (u64::from(value) + 500) / 1000)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatReadout {
    pub label: &'static str,
    pub value: String,
}

/// Tile readouts. Magia is shown raw, the other three in thousands.
pub fn stat_readouts(stats: &Stats) -> [StatReadout; 4] {
    [
        StatReadout {
            label: "Furia",
            value: format_thousands(stats.furia),
        },
        StatReadout {
            label: "Magia",
            value: stats.magia.to_string(),
        },
        StatReadout {
            label: "Armas",
            value: format_thousands(stats.armas),
        },
        StatReadout {
            label: "Fuerza",
            value: format_thousands(stats.fuerza),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(numero: u32, nombre: &str, grupo: &str, furia: u32, magia: u32) -> Card {
        Card {
            numero,
            nombre: nombre.into(),
            grupo: grupo.into(),
            image: format!("img/{numero}.png"),
            stats: Stats {
                furia,
                magia,
                armas: 0,
                fuerza: 0,
            },
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            card(3, "Ñandú", "Viento", 2000, 1),
            card(1, "Ardo", "Fuego", 5000, 3),
            card(2, "Brisa", "Viento", 1000, 7),
            card(4, "Nube", "Agua", 2000, 9),
        ])
    }

    fn names<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<&'a str> {
        cards.into_iter().map(|c| c.nombre.as_str()).collect()
    }

    #[test]
    fn test_filter_by_normalized_name() {
        let catalog = catalog();
        let filter_state = FilterState {
            name: "NANDU".into(),
            faction: None,
        };
        assert_eq!(names(filter(catalog.cards(), &filter_state)), vec!["Ñandú"]);
    }

    #[test]
    fn test_filter_faction_is_exact() {
        let catalog = catalog();
        let mut filter_state = FilterState {
            name: String::new(),
            faction: Some("viento".into()),
        };
        assert!(filter(catalog.cards(), &filter_state).is_empty());

        filter_state.faction = Some("Viento".into());
        assert_eq!(names(filter(catalog.cards(), &filter_state)), vec!["Ñandú", "Brisa"]);
    }

    #[test]
    fn test_empty_faction_string_is_no_constraint() {
        let catalog = catalog();
        let filter_state = FilterState {
            name: String::new(),
            faction: Some(String::new()),
        };
        assert_eq!(filter(catalog.cards(), &filter_state).len(), 4);
    }

    #[test]
    fn test_sort_by_name_uses_spanish_order() {
        let catalog = catalog();
        let sorted = sort(catalog.cards().iter().collect(), Some(SortKey::Nombre));
        assert_eq!(names(sorted), vec!["Ardo", "Brisa", "Nube", "Ñandú"]);
    }

    #[test]
    fn test_sort_stats_descending_and_stable() {
        let catalog = catalog();
        let sorted = sort(catalog.cards().iter().collect(), Some(SortKey::Furia));
        // Ñandú and Nube tie at 2000 and keep catalog order.
        assert_eq!(names(sorted), vec!["Ardo", "Ñandú", "Nube", "Brisa"]);
    }

    #[test]
    fn test_sort_none_is_passthrough() {
        let catalog = catalog();
        let sorted = sort(catalog.cards().iter().collect(), None);
        assert_eq!(names(sorted), vec!["Ñandú", "Ardo", "Brisa", "Nube"]);
    }

    #[test]
    fn test_group_uses_catalog_faction_order() {
        let catalog = catalog();
        let sorted = sort(catalog.cards().iter().collect(), Some(SortKey::Numero));
        let groups = group(&sorted, &catalog);
        let factions: Vec<_> = groups.iter().map(|g| g.faction).collect();
        assert_eq!(factions, vec!["Viento", "Fuego", "Agua"]);
        assert_eq!(names(groups[0].cards.iter().copied()), vec!["Brisa", "Ñandú"]);
    }

    #[test]
    fn test_view_positions() {
        let catalog = catalog();
        let view = ViewResult::compute(&catalog, &FilterState::default(), None);
        assert_eq!(view.total, 4);
        assert_eq!(view.position(0), Some((0, 0)));
        assert_eq!(view.position(2), Some((1, 0)));
        assert_eq!(view.position(3), Some((2, 0)));
        assert_eq!(view.position(4), None);
        assert_eq!(view.index_of(2, 0), 3);
        assert_eq!(view.card_at(1).map(|c| c.nombre.as_str()), Some("Brisa"));
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(summary_text(0), NO_RESULTS_STATUS);
        assert_eq!(summary_text(1), "1 carta encontrada");
        assert_eq!(summary_text(2), "2 cartas encontradas");
    }

    #[test]
    fn test_format_thousands_rounds_half_up() {
        assert_eq!(format_thousands(5000), "5k");
        assert_eq!(format_thousands(1499), "1k");
        assert_eq!(format_thousands(1500), "2k");
        assert_eq!(format_thousands(499), "0k");
        assert_eq!(format_thousands(0), "0k");
    }

    #[test]
    fn test_magia_is_raw() {
        let readouts = stat_readouts(&Stats {
            furia: 5000,
            magia: 3,
            armas: 1000,
            fuerza: 2000,
        });
        let values: Vec<_> = readouts.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["5k", "3", "1k", "2k"]);
    }

    #[test]
    fn test_cycle_sort_wraps() {
        assert_eq!(cycle_sort(None, 1), Some(SortKey::Numero));
        assert_eq!(cycle_sort(Some(SortKey::Fuerza), 1), None);
        assert_eq!(cycle_sort(None, -1), Some(SortKey::Fuerza));
    }
}
