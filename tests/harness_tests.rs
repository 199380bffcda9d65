//! Store + component flows with EffectStoreTestHarness

use cartas::{
    action::Action,
    catalog::{Card, Catalog, Stats},
    components::{AppShell, AppShellProps, CardGrid, CardGridProps, Component},
    effect::Effect,
    preview::{ImagePreview, ImageStatus},
    reducer::reducer,
    state::{AppState, FocusArea, Page},
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

fn card(numero: u32, nombre: &str, grupo: &str) -> Card {
    Card {
        numero,
        nombre: nombre.into(),
        grupo: grupo.into(),
        image: format!("img/{numero}.png"),
        stats: Stats {
            furia: numero * 1000,
            magia: numero,
            armas: numero * 500,
            fuerza: numero * 250,
        },
    }
}

fn catalog_page_state() -> AppState {
    let mut state = AppState::new("juego", "data/cards.json");
    state.page = Page::Catalogo;
    state.terminal_size = (120, 40);
    state
}

#[test]
fn test_catalog_load_flow() {
    let mut harness = EffectStoreTestHarness::new(catalog_page_state(), reducer);

    harness.dispatch_collect(Action::CatalogFetch);
    harness.assert_state(|s| s.catalog.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadCatalog { .. }));

    harness.complete_action(Action::CatalogDidLoad(Catalog::new(vec![
        card(1, "Ardo", "Fuego"),
        card(2, "Brisa", "Viento"),
    ])));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.catalog.is_loaded());
    harness.assert_state(|s| s.view.total == 2);
    harness.assert_state(|s| s.image_status("img/1.png") == Some(&ImageStatus::Loading));
}

#[test]
fn test_catalog_error_flow() {
    let mut harness = EffectStoreTestHarness::new(catalog_page_state(), reducer);

    harness.dispatch_collect(Action::CatalogFetch);
    harness.complete_action(Action::CatalogDidError("expected value at line 1".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.catalog.is_failed());
    harness.assert_state(|s| s.catalog.error() == Some("expected value at line 1"));
}

#[test]
fn test_image_results_update_cache() {
    let mut state = catalog_page_state();
    state.catalog = DataResource::Loaded(Catalog::new(vec![card(1, "Ardo", "Fuego")]));
    state.apply_filters();
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    let preview = ImagePreview {
        width: 1,
        height: 1,
        pixels: vec![[10, 20, 30]],
    };
    harness.complete_action(Action::ImageDidLoad {
        path: "img/1.png".into(),
        preview: preview.clone(),
    });
    harness.complete_action(Action::ImageDidError {
        path: "img/2.png".into(),
        error: "No such file".into(),
    });
    harness.process_emitted();

    let ready = ImageStatus::Ready(preview);
    harness.assert_state(move |s| s.image_status("img/1.png") == Some(&ready));
    harness.assert_state(|s| {
        matches!(s.image_status("img/2.png"), Some(ImageStatus::Unavailable(_)))
    });
}

#[test]
fn test_keyboard_cycles_faction() {
    let mut state = catalog_page_state();
    state.catalog = DataResource::Loaded(Catalog::new(vec![
        card(1, "Ardo", "Fuego"),
        card(2, "Brisa", "Viento"),
    ]));
    state.apply_filters();
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    let mut grid = CardGrid::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("f", |state, event| {
        let props = CardGridProps {
            state,
            is_focused: true,
        };
        grid.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.filter.faction.as_deref() == Some("Fuego"));
    harness.assert_state(|s| s.view.total == 1);
}

#[test]
fn test_name_input_flow() {
    let mut state = catalog_page_state();
    state.catalog = DataResource::Loaded(Catalog::new(vec![
        card(1, "Ardo", "Fuego"),
        card(2, "Brisa", "Viento"),
    ]));
    state.apply_filters();
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    let mut shell = AppShell::new();

    // "/" focuses the input, then each key edits the query live.
    for keys in ["/", "b", "r"] {
        let actions = harness.send_keys::<NumericComponentId, _, _>(keys, |state, event| {
            shell.handle_catalog_event(&event.kind, state)
        });
        for action in actions {
            harness.dispatch_collect(action);
        }
    }

    harness.assert_state(|s| s.focus == FocusArea::NameInput);
    harness.assert_state(|s| s.filter.name == "br");
    harness.assert_state(|s| s.view.total == 1);
}

#[test]
fn test_render_after_load() {
    let mut harness = EffectStoreTestHarness::new(catalog_page_state(), reducer);
    let mut shell = AppShell::new();

    harness.dispatch_collect(Action::CatalogDidLoad(Catalog::new(vec![
        card(1, "Ardo", "Fuego"),
        card(2, "Brisa", "Viento"),
    ])));

    let output = harness.render_plain(120, 40, |frame, area, state| {
        let props = AppShellProps {
            state,
            is_focused: true,
        };
        shell.render(frame, area, props);
    });

    assert!(output.contains("Ardo"), "card name missing:\n{output}");
    assert!(output.contains("Brisa"));
    assert!(output.contains("2 cartas encontradas"));
}
