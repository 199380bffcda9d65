use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    widgets::Block,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::about_page::{AboutPage, AboutPageProps};
use super::card_grid::{CardGrid, CardGridProps};
use super::card_modal::{CardModal, CardModalProps};
use super::filter_bar::{FilterBar, FilterBarProps};
use super::home_page::{HomePage, HomePageProps};
use super::image_modal::{ImageModal, ImageModalProps};
use super::nav_bar::{NavBar, NavBarProps};
use super::theme::{ACCENT_GOLD, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::{AppState, FocusArea, Page};

/// Height of the filter bar on the catalog page
pub const FILTER_BAR_HEIGHT: u16 = 3;

/// Screen regions shared by rendering and event routing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellLayout {
    pub nav: Rect,
    pub page: Rect,
    pub status: Rect,
}

impl ShellLayout {
    pub fn new(area: Rect) -> Self {
        let [nav, page, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Self { nav, page, status }
    }

    /// (filter bar, grid) inside the catalog page. The grid is inset by one
    /// column on each side.
    pub fn catalog(&self) -> (Rect, Rect) {
        let [filter, grid] =
            Layout::vertical([Constraint::Length(FILTER_BAR_HEIGHT), Constraint::Min(1)])
                .areas(self.page);
        (filter, grid.inner(Margin::new(1, 0)))
    }
}

pub fn full_area(state: &AppState) -> Rect {
    Rect::new(0, 0, state.terminal_size.0, state.terminal_size.1)
}

/// Label shown above an image overlay: the illustrative image's name, or
/// the raw path.
fn image_title<'a>(state: &'a AppState, path: &'a str) -> &'a str {
    state
        .about_images
        .iter()
        .find(|image| image.path == path)
        .map_or(path, |image| image.label.as_str())
}

fn status_bar_style() -> StatusBarStyle {
    StatusBarStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: None,
        },
        text: Style::default().fg(TEXT_MAIN),
        hint_key: Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    }
}

struct StatusHints {
    left: Vec<StatusBarHint<'static>>,
    right: Vec<StatusBarHint<'static>>,
}

fn status_hints(state: &AppState) -> StatusHints {
    let hint = |key: &'static str, label: &'static str| StatusBarHint::new(key, label);
    let nav = vec![hint("1-3", "páginas"), hint("q", "salir")];
    if state.modal_open() {
        return StatusHints {
            left: vec![hint("x/Esc", "cerrar")],
            right: Vec::new(),
        };
    }
    match state.page {
        Page::Catalogo if state.focus == FocusArea::NameInput => StatusHints {
            left: vec![hint("Enter", "aplicar"), hint("Esc", "volver")],
            right: Vec::new(),
        },
        Page::Catalogo => StatusHints {
            left: vec![
                hint("←↑↓→", "mover"),
                hint("Enter", "ver"),
                hint("/", "nombre"),
                hint("f/F", "facción"),
                hint("c", "todas"),
                hint("s/S", "orden"),
            ],
            right: nav,
        },
        Page::Sobre => StatusHints {
            left: vec![hint("↑↓", "elegir"), hint("Enter", "abrir")],
            right: nav,
        },
        Page::Inicio => StatusHints {
            left: vec![hint("Enter", "ver cartas")],
            right: nav,
        },
    }
}

/// Root of the UI: navigation, the active page, status hints and overlays
pub struct AppShell {
    nav: NavBar,
    home: HomePage,
    filter_bar: FilterBar,
    grid: CardGrid,
    about: AboutPage,
    card_modal: CardModal,
    image_modal: ImageModal,
    status_bar: StatusBar,
}

pub struct AppShellProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for AppShell {
    fn default() -> Self {
        Self {
            nav: NavBar::default(),
            home: HomePage,
            filter_bar: FilterBar::new(),
            grid: CardGrid::default(),
            about: AboutPage::default(),
            card_modal: CardModal::default(),
            image_modal: ImageModal::default(),
            status_bar: StatusBar::new(),
        }
    }
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_nav_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = NavBarProps { page: state.page };
        self.nav.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_home_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = HomePageProps {
            catalog: &state.catalog,
        };
        self.home.handle_event(event, props).into_iter().collect()
    }

    /// Catalog page keys go to the name input while it has focus, to the
    /// grid otherwise.
    pub fn handle_catalog_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        if state.focus == FocusArea::NameInput {
            let props = FilterBarProps {
                filter: &state.filter,
                sort_key: state.sort_key,
                summary: "",
                is_focused: true,
            };
            return self.filter_bar.handle_event(event, props).into_iter().collect();
        }
        let props = CardGridProps {
            state,
            is_focused: true,
        };
        self.grid.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_about_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = AboutPageProps {
            images: &state.about_images,
            selected: state.about_selected,
            preview: None,
            is_focused: true,
        };
        self.about.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_card_modal_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let Some(card) = &state.card_modal else {
            return Vec::new();
        };
        let props = CardModalProps {
            card,
            image: state.image_status(&card.image),
            screen: full_area(state),
            is_focused: true,
        };
        self.card_modal.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_image_modal_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let Some(path) = &state.image_modal else {
            return Vec::new();
        };
        let props = ImageModalProps {
            title: image_title(state, path),
            image: state.image_status(path),
            screen: full_area(state),
            is_focused: true,
        };
        self.image_modal.handle_event(event, props).into_iter().collect()
    }

    fn render_catalog(
        &mut self,
        frame: &mut Frame,
        layout: &ShellLayout,
        state: &AppState,
        is_focused: bool,
    ) {
        let (filter_area, grid_area) = layout.catalog();
        let summary = state.result_summary();
        let filter_props = FilterBarProps {
            filter: &state.filter,
            sort_key: state.sort_key,
            summary: &summary,
            is_focused: is_focused && state.focus == FocusArea::NameInput,
        };
        self.filter_bar.render(frame, filter_area, filter_props);

        let grid_props = CardGridProps {
            state,
            is_focused: is_focused && state.focus == FocusArea::Grid,
        };
        self.grid.render(frame, grid_area, grid_props);
    }
}

impl Component<Action> for AppShell {
    type Props<'a> = AppShellProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let page_focused = props.is_focused && !state.modal_open();
        let layout = ShellLayout::new(area);

        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        self.nav.render(frame, layout.nav, NavBarProps { page: state.page });

        match state.page {
            Page::Inicio => self.home.render(
                frame,
                layout.page,
                HomePageProps {
                    catalog: &state.catalog,
                },
            ),
            Page::Catalogo => self.render_catalog(frame, &layout, state, page_focused),
            Page::Sobre => {
                let preview = state
                    .about_images
                    .get(state.about_selected)
                    .and_then(|image| state.image_status(&image.path));
                self.about.render(
                    frame,
                    layout.page,
                    AboutPageProps {
                        images: &state.about_images,
                        selected: state.about_selected,
                        preview,
                        is_focused: page_focused,
                    },
                );
            }
        }

        let hints = status_hints(state);
        let status_props = StatusBarProps {
            left: StatusBarSection::hints(&hints.left),
            center: StatusBarSection::empty(),
            right: StatusBarSection::hints(&hints.right),
            style: status_bar_style(),
            is_focused: false,
        };
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            layout.status,
            status_props,
        );

        if let Some(card) = &state.card_modal {
            self.card_modal.render(
                frame,
                area,
                CardModalProps {
                    card,
                    image: state.image_status(&card.image),
                    screen: area,
                    is_focused: props.is_focused && state.image_modal.is_none(),
                },
            );
        }
        if let Some(path) = &state.image_modal {
            self.image_modal.render(
                frame,
                area,
                ImageModalProps {
                    title: image_title(state, path),
                    image: state.image_status(path),
                    screen: area,
                    is_focused: props.is_focused,
                },
            );
        }
    }
}
