//! Actions - every state transition enters through one of these

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::CatalogItem;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Catalog category =====
    /// Intent: load the catalog (startup, or manual retry after a failure)
    CatalogFetch,

    /// Result: the whole batch fetched and normalized
    CatalogDidLoad(Vec<CatalogItem>),

    /// Result: the batch failed as a unit; no partial list
    CatalogDidError(String),

    // ===== Search category =====
    /// Focus the search bar, starting from an empty query
    SearchOpen,

    /// Leave search mode and clear the query
    SearchClose,

    /// Query text changed (one action per keystroke)
    SearchQueryChange(String),

    /// Submit the query: keep the filter, return focus to the grid
    SearchSubmit(String),

    // ===== Cursor category =====
    /// Move the grid cursor by cards (left/right)
    CursorMove(i16),

    /// Move the grid cursor by rows (up/down)
    CursorRow(i16),

    CursorJumpTop,
    CursorJumpBottom,

    // ===== Selection / favorites =====
    /// Set or clear the detail overlay target by item id
    Select(Option<u16>),

    /// Flip favorite membership for an item id
    FavoriteToggle(u16),

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    /// Force a re-render (cursor movement in the search input)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
