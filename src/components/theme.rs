use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Borders;
use tui_dispatch_components::{
    BaseStyle, BorderStyle, ModalStyle, Padding, ScrollbarStyle, SelectListStyle, SelectionStyle,
    TextInputStyle,
};

pub const BG_BASE: Color = Color::Rgb(18, 18, 22);
pub const BG_PANEL: Color = Color::Rgb(30, 30, 36);
pub const BG_IMAGE: Color = Color::Rgb(0x25, 0x25, 0x25);
pub const BG_HIGHLIGHT: Color = Color::Rgb(70, 42, 28);
pub const TEXT_MAIN: Color = Color::Rgb(236, 232, 224);
pub const TEXT_DIM: Color = Color::Rgb(150, 146, 140);
pub const TEXT_PLACEHOLDER: Color = Color::Rgb(0x99, 0x99, 0x99);
pub const ACCENT: Color = Color::Rgb(230, 140, 60);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 190, 96);
pub const ERROR: Color = Color::Rgb(230, 80, 80);

pub fn panel_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

pub fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: Some(Style::default().bg(ACCENT_GOLD).fg(BG_BASE)),
    }
}

pub fn modal_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_GOLD)),
            }),
            padding: Padding::all(1),
            bg: Some(BG_PANEL),
            fg: None,
        },
    }
}

pub fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        scrollbar: ScrollbarStyle::default(),
    }
}
