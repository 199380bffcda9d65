use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};

use super::theme::{ACCENT, ACCENT_GOLD, ERROR, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::catalog::Catalog;
use crate::state::Page;

const TITLE: &str = "CARTAS";

/// Landing page: title banner, short intro and catalog totals
pub struct HomePage;

pub struct HomePageProps<'a> {
    pub catalog: &'a DataResource<Catalog>,
}

fn title_fill() -> Fill {
    let warm = ArtColor::rgb(255, 170, 80);
    let gold = ArtColor::rgb(240, 210, 120);
    let stops = vec![
        ColorStop::new(0.0, warm),
        ColorStop::new(0.5, gold),
        ColorStop::new(1.0, warm),
    ];
    Fill::Linear(LinearGradient::new(5.0, stops))
}

fn catalog_line(catalog: &DataResource<Catalog>) -> Line<'static> {
    match catalog {
        DataResource::Loaded(catalog) => Line::from(vec![
            Span::styled(
                format!("{} cartas", catalog.len()),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" en {} facciones", catalog.factions().len()),
                Style::default().fg(TEXT_DIM),
            ),
        ]),
        DataResource::Failed(_) => Line::styled(
            "No se pudo cargar el catálogo",
            Style::default().fg(ERROR),
        ),
        _ => Line::styled("Cargando cartas...", Style::default().fg(TEXT_DIM)),
    }
}

impl Component<Action> for HomePage {
    type Props<'a> = HomePageProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Enter => Some(Action::NavSelect(Page::Catalogo)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [_, banner, _, intro, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Fill(1),
        ])
        .areas(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill());
        frame.render_widget(ArtBox::new(&renderer, TITLE), banner);

        let lines = vec![
            Line::styled(
                "Juego de cartas de facciones enfrentadas",
                Style::default().fg(TEXT_MAIN),
            )
            .centered(),
            Line::default(),
            catalog_line(props.catalog).centered(),
            Line::default(),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::styled(" o ", Style::default().fg(TEXT_DIM)),
                Span::styled("2", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::styled(" para ver las cartas", Style::default().fg(TEXT_DIM)),
            ])
            .centered(),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), intro);
    }
}
