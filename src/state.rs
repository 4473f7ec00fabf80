//! Application state - single source of truth

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

/// Default number of catalog entries fetched at startup.
pub const DEFAULT_FETCH_LIMIT: usize = 20;

/// Spinner timing for the catalog loading indicator.
pub const SPINNER_TICK_MS: u64 = 120;

/// Card geometry for the catalog grid.
pub const CARD_WIDTH: u16 = 22;
pub const CARD_HEIGHT: u16 = 4;

/// How many cards fit side by side in the given width.
pub fn grid_columns(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// A normalized catalog entry, built once from the detail record.
///
/// `id` is the upstream PokeAPI identifier, not the fetch-order position;
/// favorites and the detail overlay reference items through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogItem {
    pub id: u16,
    pub name: String,
    pub image_url: String,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub height_m: f32,
    pub weight_kg: f32,
}

/// One base stat of a catalog item (`base` is 0..=255 upstream).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatValue {
    pub name: String,
    pub base: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Everything the UI needs to render.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Catalog lifecycle: Empty -> Loading -> Loaded/Failed, driven by the
    /// single startup fetch (plus manual retry from the failed state).
    pub catalog: DataResource<Vec<CatalogItem>>,

    /// Indices into the loaded catalog that match the current query,
    /// in catalog order.
    pub filtered_indices: Vec<usize>,

    /// Position of the highlighted card within `filtered_indices`.
    pub cursor: usize,

    pub search: SearchState,

    /// Item id shown in the detail overlay; `None` means no overlay.
    pub detail: Option<u16>,

    /// Item ids marked as favorite. Reset on restart.
    pub favorites: HashSet<u16>,

    pub fetch_limit: usize,
    pub terminal_size: (u16, u16),
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: DataResource::Empty,
            filtered_indices: Vec::new(),
            cursor: 0,
            search: SearchState::default(),
            detail: None,
            favorites: HashSet::new(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            terminal_size: (80, 24),
            tick: 0,
        }
    }
}

/// Pure filter predicate: case-insensitive substring match against the
/// item's name, any of its type tags, or the decimal form of its id.
/// An empty query matches everything.
pub fn matches_query(item: &CatalogItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    item.name.to_lowercase().contains(&query)
        || item.types.iter().any(|tag| tag.to_lowercase().contains(&query))
        || item.id.to_string().contains(&query)
}

impl AppState {
    pub fn new(fetch_limit: usize) -> Self {
        Self {
            fetch_limit,
            ..Default::default()
        }
    }

    /// The loaded catalog, or an empty slice before the fetch completes.
    pub fn items(&self) -> &[CatalogItem] {
        self.catalog.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Recompute `filtered_indices` from the catalog and the current query,
    /// keeping the cursor in bounds.
    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.trim().to_string();
        let indices: Vec<usize> = self
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_query(item, &query))
            .map(|(idx, _)| idx)
            .collect();
        self.filtered_indices = indices;
        if self.cursor >= self.filtered_indices.len() {
            self.cursor = 0;
        }
    }

    /// Move the cursor, clamped to the filtered list. Returns whether it moved.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.cursor {
            self.cursor = bounded;
            return true;
        }
        false
    }

    pub fn filtered_item(&self, position: usize) -> Option<&CatalogItem> {
        self.filtered_indices
            .get(position)
            .and_then(|idx| self.items().get(*idx))
    }

    /// The item under the grid cursor, if any.
    pub fn cursor_item(&self) -> Option<&CatalogItem> {
        self.filtered_item(self.cursor)
    }

    /// Resolve the detail overlay target. A dangling id resolves to `None`
    /// and the overlay renders nothing.
    pub fn detail_item(&self) -> Option<&CatalogItem> {
        let id = self.detail?;
        self.items().iter().find(|item| item.id == id)
    }

    pub fn is_favorite(&self, id: u16) -> bool {
        self.favorites.contains(&id)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("loaded", ron_string(&self.items().len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("cursor", ron_string(&self.cursor))
                .entry("loading", ron_string(&self.catalog.is_loading()))
                .entry("fetch_limit", ron_string(&self.fetch_limit)),
            DebugSection::new("View")
                .entry("query", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("detail", ron_string(&self.detail))
                .entry("favorites", ron_string(&self.favorites.len())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u16, name: &str, types: &[&str]) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            image_url: String::new(),
            types: types.iter().map(|tag| tag.to_string()).collect(),
            stats: Vec::new(),
            height_m: 0.0,
            weight_kg: 0.0,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let bulbasaur = item(1, "bulbasaur", &["grass", "poison"]);
        assert!(matches_query(&bulbasaur, ""));
    }

    #[test]
    fn test_query_matches_name_type_and_id() {
        let bulbasaur = item(1, "bulbasaur", &["grass", "poison"]);
        assert!(matches_query(&bulbasaur, "saur"));
        assert!(matches_query(&bulbasaur, "POISON"));
        assert!(matches_query(&bulbasaur, "1"));
        assert!(!matches_query(&bulbasaur, "fire"));
        assert!(!matches_query(&bulbasaur, "02"));
    }

    #[test]
    fn test_rebuild_preserves_catalog_order() {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(vec![
            item(4, "charmander", &["fire"]),
            item(1, "bulbasaur", &["grass", "poison"]),
            item(7, "squirtle", &["water"]),
        ]);
        state.rebuild_filtered();
        assert_eq!(state.filtered_indices, vec![0, 1, 2]);

        state.search.query = "r".to_string();
        state.rebuild_filtered();
        // All three contain "r"; order unchanged.
        assert_eq!(state.filtered_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_rebuild_clamps_cursor() {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(vec![
            item(1, "bulbasaur", &["grass", "poison"]),
            item(4, "charmander", &["fire"]),
        ]);
        state.rebuild_filtered();
        state.cursor = 1;

        state.search.query = "grass".to_string();
        state.rebuild_filtered();
        assert_eq!(state.filtered_indices.len(), 1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_detail_item_tolerates_dangling_id() {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(vec![item(1, "bulbasaur", &["grass"])]);
        state.detail = Some(999);
        assert!(state.detail_item().is_none());
    }

    #[test]
    fn test_grid_columns_never_zero() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(CARD_WIDTH - 1), 1);
        assert_eq!(grid_columns(CARD_WIDTH * 3 + 5), 3);
    }
}
