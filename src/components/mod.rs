pub mod catalog_display;
pub mod catalog_grid;
pub mod detail_panel;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_display::{CatalogDisplay, CatalogDisplayProps};
pub use catalog_grid::{CatalogGrid, CatalogGridProps};
pub use detail_panel::{stat_fill_percent, DetailPanel, DetailPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};
