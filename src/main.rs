//! Cartas - card catalog browser

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use cartas::action::Action;
use cartas::catalog;
use cartas::components::{
    AppShell, AppShellProps, Component, ShellLayout, card_modal_area, image_modal_area,
};
use cartas::effect::Effect;
use cartas::pipeline::SortKey;
use cartas::preview;
use cartas::reducer::reducer;
use cartas::state::{AppState, DEFAULT_CATALOG_PATH, FocusArea, Page};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Browse, filter and sort the card catalog in the terminal
#[derive(Parser, Debug)]
#[command(name = "cartas")]
#[command(about = "Card catalog browser with filters by name, faction and stats")]
struct Args {
    /// Directory the catalog and image paths are resolved against
    #[arg(long, env = "CARTAS_ASSETS", default_value = ".")]
    assets: String,

    /// Catalog JSON file, relative to the asset directory
    #[arg(long, env = "CARTAS_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    catalog: String,

    /// Initial name filter
    #[arg(long, default_value = "")]
    name: String,

    /// Initial faction filter
    #[arg(long)]
    faction: Option<String>,

    /// Initial sort key (catalog order when omitted)
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Write logs to this file (no logging otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `cartas=debug`
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CartasComponentId {
    Nav,
    Home,
    Catalog,
    About,
    CardModal,
    ImageModal,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CartasContext {
    Main,
    NameInput,
    Modal,
}

impl EventRoutingState<CartasComponentId, CartasContext> for AppState {
    fn focused(&self) -> Option<CartasComponentId> {
        if let Some(modal) = self.modal() {
            return Some(modal);
        }
        match self.page {
            Page::Inicio => Some(CartasComponentId::Home),
            Page::Catalogo => Some(CartasComponentId::Catalog),
            Page::Sobre => Some(CartasComponentId::About),
        }
    }

    fn modal(&self) -> Option<CartasComponentId> {
        if self.image_modal.is_some() {
            Some(CartasComponentId::ImageModal)
        } else if self.card_modal.is_some() {
            Some(CartasComponentId::CardModal)
        } else {
            None
        }
    }

    fn binding_context(&self, id: CartasComponentId) -> CartasContext {
        match id {
            CartasComponentId::CardModal | CartasComponentId::ImageModal => CartasContext::Modal,
            CartasComponentId::Catalog if self.focus == FocusArea::NameInput => {
                CartasContext::NameInput
            }
            _ => CartasContext::Main,
        }
    }

    fn default_context(&self) -> CartasContext {
        CartasContext::Main
    }
}

/// Install the file logger. The TUI owns stdout, so without a log file
/// nothing is installed.
fn init_logging(log_file: Option<&PathBuf>, log_level: &str) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        assets,
        catalog,
        name,
        faction,
        sort,
        log_file,
        log_level,
        debug: debug_args,
    } = Args::parse();

    init_logging(log_file.as_ref(), &log_level)?;
    tracing::info!(assets = %assets, catalog = %catalog, "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(assets, catalog);
            state.filter.name = name;
            state.filter.faction = faction.filter(|f| !f.is_empty());
            state.sort_key = sort;
            if let Ok(size) = terminal::size() {
                state.terminal_size = size;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct CartasUi {
    shell: AppShell,
}

impl CartasUi {
    fn new() -> Self {
        Self {
            shell: AppShell::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CartasComponentId>,
    ) {
        let layout = ShellLayout::new(area);
        event_ctx.set_component_area(CartasComponentId::Nav, layout.nav);

        let pages = [
            (Page::Inicio, CartasComponentId::Home),
            (Page::Catalogo, CartasComponentId::Catalog),
            (Page::Sobre, CartasComponentId::About),
        ];
        for (page, id) in pages {
            if page == state.page {
                event_ctx.set_component_area(id, layout.page);
            } else {
                event_ctx.component_areas.remove(&id);
            }
        }

        if state.card_modal.is_some() {
            event_ctx.set_component_area(CartasComponentId::CardModal, card_modal_area(area));
        } else {
            event_ctx
                .component_areas
                .remove(&CartasComponentId::CardModal);
        }
        if state.image_modal.is_some() {
            event_ctx.set_component_area(CartasComponentId::ImageModal, image_modal_area(area));
        } else {
            event_ctx
                .component_areas
                .remove(&CartasComponentId::ImageModal);
        }

        let props = AppShellProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.shell.render(frame, area, props);
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

/// Keys that work on every page while no overlay is open and the name
/// input does not have focus.
fn handle_global_event(event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
    match event {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(*width, *height)).with_render()
        }
        EventKind::Key(key) if !state.modal_open() && state.focus != FocusArea::NameInput => {
            match key.code {
                KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
                KeyCode::Char('1') => HandlerResponse::action(Action::NavSelect(Page::Inicio)),
                KeyCode::Char('2') => HandlerResponse::action(Action::NavSelect(Page::Catalogo)),
                KeyCode::Char('3') => HandlerResponse::action(Action::NavSelect(Page::Sobre)),
                KeyCode::Tab => HandlerResponse::action(Action::NavCycle(1)),
                KeyCode::BackTab => HandlerResponse::action(Action::NavCycle(-1)),
                _ => HandlerResponse::ignored(),
            }
        }
        _ => HandlerResponse::ignored(),
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CartasUi::new()));
    let mut bus: EventBus<AppState, Action, CartasComponentId, CartasContext> = EventBus::new();
    let keybindings: Keybindings<CartasContext> = Keybindings::new();

    let ui_nav = Rc::clone(&ui);
    bus.register(CartasComponentId::Nav, move |event, state| {
        handler_response(ui_nav.borrow_mut().shell.handle_nav_event(&event.kind, state))
    });

    let ui_home = Rc::clone(&ui);
    bus.register(CartasComponentId::Home, move |event, state| {
        handler_response(ui_home.borrow_mut().shell.handle_home_event(&event.kind, state))
    });

    let ui_catalog = Rc::clone(&ui);
    bus.register(CartasComponentId::Catalog, move |event, state| {
        handler_response(
            ui_catalog
                .borrow_mut()
                .shell
                .handle_catalog_event(&event.kind, state),
        )
    });

    let ui_about = Rc::clone(&ui);
    bus.register(CartasComponentId::About, move |event, state| {
        handler_response(ui_about.borrow_mut().shell.handle_about_event(&event.kind, state))
    });

    let ui_card = Rc::clone(&ui);
    bus.register(CartasComponentId::CardModal, move |event, state| {
        handler_response(
            ui_card
                .borrow_mut()
                .shell
                .handle_card_modal_event(&event.kind, state),
        )
    });

    let ui_image = Rc::clone(&ui);
    bus.register(CartasComponentId::ImageModal, move |event, state| {
        handler_response(
            ui_image
                .borrow_mut()
                .shell
                .handle_image_modal_event(&event.kind, state),
        )
    });

    bus.register_global(|event, state| handle_global_event(&event.kind, state));

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::CatalogFetch),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { path } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match catalog::load_catalog(&path).await {
                    Ok(catalog) => Action::CatalogDidLoad(catalog),
                    Err(err) => Action::CatalogDidError(err.to_string()),
                }
            });
        }
        Effect::LoadImage { key, path } => {
            let task = format!("image_{key}");
            ctx.tasks().spawn(TaskKey::new(task), async move {
                match preview::load_preview(&path).await {
                    Ok(preview) => Action::ImageDidLoad { path: key, preview },
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "image unavailable");
                        Action::ImageDidError {
                            path: key,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
