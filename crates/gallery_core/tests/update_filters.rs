use std::sync::Once;

use gallery_core::{
    update, AlbumFilter, Effect, GalleryItem, GalleryState, Msg, EMPTY_GALLERY_MESSAGE,
    NO_PROMPT_CAPTION,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn loaded(items: Vec<GalleryItem>) -> GalleryState {
    let (state, effects) = update(GalleryState::new(), Msg::LoadMore);
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("expected one fetch, got {other:?}"),
    };
    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            items,
            next_cursor: Some("more".to_string()),
        },
    );
    assert!(state.consume_dirty());
    state
}

fn sample() -> Vec<GalleryItem> {
    vec![
        GalleryItem::new("1", "u1").with_album(Some("motif")).with_prompt("gold ring"),
        GalleryItem::new("2", "u2").with_album(Some("Index")),
        GalleryItem::new("3", "u3").with_album(None),
        GalleryItem::new("4", "u4").with_album(Some("motif")),
        GalleryItem::new("5", "u5").with_album(Some("custom")),
        GalleryItem::new("6", "u6").with_album(Some("index")),
    ]
}

fn visible_ids(state: &GalleryState) -> Vec<String> {
    state.visible_items().map(|i| i.public_id.clone()).collect()
}

#[test]
fn filter_by_each_tallied_album_yields_matching_subset() {
    init_logging();
    let state = loaded(sample());

    for entry in state.album_tally() {
        let (next, effects) = update(state.clone(), Msg::AlbumSelected(entry.name.clone()));
        assert!(effects.is_empty(), "filtering must not fetch");

        let expected: Vec<String> = next
            .items()
            .iter()
            .filter(|item| entry.name == "all" || item.album == entry.name)
            .map(|item| item.public_id.clone())
            .collect();
        assert_eq!(visible_ids(&next), expected);
        assert_eq!(next.view().cards.len(), entry.count);
    }
}

#[test]
fn tally_counts_add_up_to_total() {
    let state = loaded(sample());
    let tally = state.album_tally();

    assert_eq!(tally[0].name, "all");
    assert_eq!(tally[0].count, state.items().len());
    let rest: usize = tally[1..].iter().map(|entry| entry.count).sum();
    assert_eq!(rest, state.items().len());

    let names: Vec<_> = tally.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["all", "index", "motif", "unknown", "custom"]);
}

#[test]
fn item_without_album_counts_as_unknown() {
    let state = loaded(vec![GalleryItem::new("x", "u").with_album(None)]);
    let unknown = state
        .album_tally()
        .into_iter()
        .find(|entry| entry.name == "unknown")
        .expect("unknown entry");
    assert_eq!(unknown.count, 1);

    let (state, _) = update(state, Msg::AlbumSelected("unknown".to_string()));
    assert_eq!(visible_ids(&state), vec!["x".to_string()]);
}

#[test]
fn filter_for_absent_album_is_empty_not_error() {
    init_logging();
    let state = loaded(sample());
    let (mut state, effects) = update(state, Msg::AlbumSelected("vector".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.album_filter(), &AlbumFilter::Album("vector".to_string()));
    let view = state.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some(EMPTY_GALLERY_MESSAGE));
    assert!(view.albums.iter().all(|entry| !entry.active));
    assert!(state.consume_dirty());
}

#[test]
fn show_all_clears_filter() {
    let state = loaded(sample());
    let (state, _) = update(state, Msg::AlbumSelected("Motif".to_string()));
    assert_eq!(visible_ids(&state), vec!["1".to_string(), "4".to_string()]);

    let (state, _) = update(state, Msg::ShowAllClicked);
    assert_eq!(state.album_filter(), &AlbumFilter::All);
    assert_eq!(visible_ids(&state).len(), 6);
    let view = state.view();
    assert!(view.albums[0].active);
    assert_eq!(view.albums[0].label, "All");
}

#[test]
fn search_narrows_album_list_but_not_cards() {
    init_logging();
    let state = loaded(sample());
    let (state, _) = update(state, Msg::AlbumSelected("index".to_string()));
    let (mut state, effects) = update(state, Msg::SearchChanged("  MOT ".to_string()));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    assert_eq!(view.search, "MOT");
    let names: Vec<_> = view.albums.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["motif"]);
    // The active filter is independent from the search box.
    assert_eq!(view.active_album, "index");
    assert_eq!(view.cards.len(), 2);

    let (state, _) = update(state, Msg::SearchChanged(String::new()));
    assert_eq!(state.view().albums.len(), 5);
}

#[test]
fn cards_carry_caption_and_alt_text() {
    let state = loaded(sample());
    let view = state.view();

    assert_eq!(view.cards[0].caption, "gold ring");
    assert_eq!(view.cards[0].alt_text, "gold ring");
    assert_eq!(view.cards[1].caption, NO_PROMPT_CAPTION);
    assert_eq!(view.cards[1].alt_text, "jewelry 2");
    assert_eq!(view.total_items, 6);
    assert_eq!(view.empty_message, None);
}

#[test]
fn long_prompt_alt_text_is_truncated() {
    let prompt = "é".repeat(200);
    let state = loaded(vec![GalleryItem::new("1", "u").with_prompt(prompt)]);
    assert_eq!(state.view().cards[0].alt_text.chars().count(), 140);
}

#[test]
fn selecting_a_card_opens_detail() {
    init_logging();
    let state = loaded(sample());

    let (state, _) = update(
        state,
        Msg::CardSelected {
            public_id: "1".to_string(),
        },
    );
    let detail = state.view().detail.expect("detail view");
    assert_eq!(detail.public_id, "1");
    assert_eq!(detail.prompt, "gold ring");
    assert_eq!(detail.album, "motif");

    // Stays open across filter changes.
    let (state, _) = update(state, Msg::AlbumSelected("index".to_string()));
    assert!(state.view().detail.is_some());

    let (mut state, _) = update(state, Msg::DetailClosed);
    assert!(state.view().detail.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn selecting_unknown_card_is_ignored() {
    let state = loaded(sample());
    let (mut state, _) = update(
        state,
        Msg::CardSelected {
            public_id: "nope".to_string(),
        },
    );
    assert!(state.view().detail.is_none());
    assert!(!state.consume_dirty());
}

#[test]
fn detail_without_prompt_uses_placeholder() {
    let state = loaded(sample());
    let (state, _) = update(
        state,
        Msg::CardSelected {
            public_id: "3".to_string(),
        },
    );
    assert_eq!(state.view().detail.unwrap().prompt, NO_PROMPT_CAPTION);
}
