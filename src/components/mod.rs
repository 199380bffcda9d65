pub mod about_page;
pub mod app_shell;
pub mod card_grid;
pub mod card_modal;
pub mod card_tile;
pub mod filter_bar;
pub mod home_page;
pub mod image_modal;
pub mod image_view;
pub mod nav_bar;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use about_page::{AboutPage, AboutPageProps};
pub use app_shell::{AppShell, AppShellProps, ShellLayout, full_area};
pub use card_grid::{CardGrid, CardGridProps};
pub use card_modal::{CardModal, CardModalProps, card_modal_area};
pub use card_tile::{CardTile, CardTileProps};
pub use filter_bar::{FilterBar, FilterBarProps};
pub use home_page::{HomePage, HomePageProps};
pub use image_modal::{ImageModal, ImageModalProps, image_modal_area};
pub use image_view::{ImageView, ImageViewProps};
pub use nav_bar::{NavBar, NavBarProps};
