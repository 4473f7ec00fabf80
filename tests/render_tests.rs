//! Render tests using RenderHarness

use tui_dispatch::{testing::*, DataResource};
use pokegrid::{
    components::{
        CatalogDisplay, CatalogDisplayProps, Component, DetailPanel, DetailPanelProps,
        SearchBar, SearchBarProps,
    },
    action::Action,
    state::{AppState, CatalogItem, StatValue},
};

fn bulbasaur() -> CatalogItem {
    CatalogItem {
        id: 1,
        name: "bulbasaur".to_string(),
        image_url: "https://img/1.png".to_string(),
        types: vec!["grass".to_string(), "poison".to_string()],
        stats: vec![
            StatValue {
                name: "hp".to_string(),
                base: 45,
            },
            StatValue {
                name: "speed".to_string(),
                base: 140,
            },
        ],
        height_m: 0.7,
        weight_kg: 6.9,
    }
}

fn state_with_catalog() -> AppState {
    let mut state = AppState::default();
    state.catalog = DataResource::Loaded(vec![bulbasaur()]);
    state.rebuild_filtered();
    state
}

#[test]
fn test_render_loading_state() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = CatalogDisplay::new();

    let state = AppState {
        catalog: DataResource::Loading,
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("Loading catalog"),
        "Should show loading branch:\n{}",
        output
    );
}

#[test]
fn test_render_error_state() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = CatalogDisplay::new();

    let state = AppState {
        catalog: DataResource::Failed("request failed: connection refused".into()),
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Catalog load failed"), "error label:\n{}", output);
    assert!(
        output.contains("connection refused"),
        "error message:\n{}",
        output
    );
    assert!(output.contains("retry"), "retry hint:\n{}", output);
}

#[test]
fn test_render_no_match_state() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = CatalogDisplay::new();

    let mut state = state_with_catalog();
    state.search.query = "zzz".to_string();
    state.rebuild_filtered();

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(
        output.contains("No matches for \"zzz\""),
        "no-match branch:\n{}",
        output
    );
    assert!(!output.contains("Bulbasaur"));
}

#[test]
fn test_render_card_contents() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = CatalogDisplay::new();

    let state = state_with_catalog();

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("#001"), "zero-padded id:\n{}", output);
    assert!(output.contains("Bulbasaur"), "formatted name:\n{}", output);
    assert!(output.contains("grass"), "type tag:\n{}", output);
}

#[test]
fn test_render_favorite_marker() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = CatalogDisplay::new();

    let mut state = state_with_catalog();
    state.favorites.insert(1);

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("★"), "favorite marker:\n{}", output);
}

#[test]
fn test_render_help_bar() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = CatalogDisplay::new();

    let state = state_with_catalog();

    let output = render.render_to_string_plain(|frame| {
        let props = CatalogDisplayProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("details"), "details hint:\n{}", output);
    assert!(output.contains("favorite"), "favorite hint:\n{}", output);
    assert!(output.contains("search"), "search hint:\n{}", output);
    assert!(output.contains("quit"), "quit hint:\n{}", output);
}

#[test]
fn test_render_detail_panel() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = DetailPanel::new();

    let item = bulbasaur();

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            item: Some(&item),
            is_favorite: false,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Bulbasaur"), "title:\n{}", output);
    assert!(output.contains("0.7 m"), "height:\n{}", output);
    assert!(output.contains("6.9 kg"), "weight:\n{}", output);
    assert!(output.contains("HP"), "stat label:\n{}", output);
    assert!(output.contains("45"), "stat value:\n{}", output);
    assert!(output.contains("esc close"), "hint line:\n{}", output);
}

#[test]
fn test_render_detail_panel_dangling_selection() {
    let mut render = RenderHarness::new(60, 24);
    let mut component = DetailPanel::new();

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            item: None,
            is_favorite: false,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    // Dangling id: no overlay content, and no panic.
    assert!(!output.contains("Height"));
}

#[test]
fn test_render_search_bar_placeholder_and_count() {
    let mut render = RenderHarness::new(60, 3);
    let mut component = SearchBar::new();

    let output = render.render_to_string_plain(|frame| {
        let props = SearchBarProps {
            query: "",
            active: true,
            is_focused: true,
            match_count: 0,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        component.render(frame, frame.area(), props);
    });
    assert!(output.contains("search (/)"), "title:\n{}", output);

    let output = render.render_to_string_plain(|frame| {
        let props = SearchBarProps {
            query: "saur",
            active: true,
            is_focused: true,
            match_count: 1,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        component.render(frame, frame.area(), props);
    });
    assert!(output.contains("1 matches"), "match count:\n{}", output);
    assert!(output.contains("saur"), "query text:\n{}", output);
}
