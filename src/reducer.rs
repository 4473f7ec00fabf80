//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{grid_columns, AppState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Catalog actions =====
        Action::CatalogFetch => {
            // One load at a time; a loaded catalog is never refetched.
            if state.catalog.is_loading() || state.catalog.is_loaded() {
                return DispatchResult::unchanged();
            }
            state.catalog = DataResource::Loading;
            state.tick = 0;
            DispatchResult::changed_with(Effect::LoadCatalog {
                limit: state.fetch_limit,
            })
        }

        Action::CatalogDidLoad(items) => {
            state.catalog = DataResource::Loaded(items);
            state.cursor = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.catalog = DataResource::Failed(error);
            state.filtered_indices.clear();
            state.cursor = 0;
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search.query = query;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            state.search.query = query.trim().to_string();
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Cursor actions =====
        Action::CursorMove(delta) => {
            let target = clamped_index(state.cursor, delta);
            if !state.set_cursor(target) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CursorRow(delta) => {
            let stride = grid_columns(state.terminal_size.0) as i16;
            let target = clamped_index(state.cursor, delta.saturating_mul(stride));
            if !state.set_cursor(target) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CursorJumpTop => {
            if !state.set_cursor(0) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CursorJumpBottom => {
            let last = state.filtered_indices.len().saturating_sub(1);
            if !state.set_cursor(last) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Selection / favorites =====
        Action::Select(id) => {
            if state.detail == id {
                return DispatchResult::unchanged();
            }
            state.detail = id;
            DispatchResult::changed()
        }

        Action::FavoriteToggle(id) => {
            if !state.favorites.remove(&id) {
                state.favorites.insert(id);
            }
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.catalog.is_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn clamped_index(current: usize, delta: i16) -> usize {
    let target = current as i64 + i64::from(delta);
    target.max(0) as usize
}
