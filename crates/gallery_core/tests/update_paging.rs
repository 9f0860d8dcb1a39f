use std::sync::Once;

use gallery_core::{update, Effect, GalleryItem, GalleryState, Msg, RequestId, PAGE_SIZE};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn item(public_id: &str, album: Option<&str>) -> GalleryItem {
    GalleryItem::new(public_id, format!("https://img.example/{public_id}.png"))
        .with_album(album)
        .with_prompt(format!("prompt for {public_id}"))
}

/// Sends `msg` and returns the single fetch it must have produced.
fn expect_fetch(state: GalleryState, msg: Msg) -> (GalleryState, RequestId, Option<String>) {
    let (state, effects) = update(state, msg);
    match effects.as_slice() {
        [Effect::FetchPage {
            request_id, cursor, ..
        }] => {
            let (request_id, cursor) = (*request_id, cursor.clone());
            (state, request_id, cursor)
        }
        other => panic!("expected one fetch, got {other:?}"),
    }
}

fn deliver(
    state: GalleryState,
    request_id: RequestId,
    items: Vec<GalleryItem>,
    next_cursor: Option<&str>,
) -> GalleryState {
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            items,
            next_cursor: next_cursor.map(str::to_string),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn first_load_requests_page_without_cursor() {
    init_logging();
    let (state, effects) = update(GalleryState::new(), Msg::LoadMore);

    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request_id: 1,
            cursor: None,
            limit: PAGE_SIZE,
        }]
    );
    assert!(state.is_loading());
    assert!(state.view().loading);
}

#[test]
fn page_size_is_configurable() {
    let (_state, effects) = update(GalleryState::with_page_size(50), Msg::LoadMore);
    assert!(matches!(
        effects.as_slice(),
        [Effect::FetchPage { limit: 50, .. }]
    ));
}

#[test]
fn second_trigger_while_loading_is_ignored() {
    init_logging();
    let (state, _request_id, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);

    let (state, effects) = update(state, Msg::SentinelVisibility { intersecting: true });
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::LoadMore);
    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn first_page_scenario_tallies_albums() {
    init_logging();
    let (state, request_id, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let mut state = deliver(
        state,
        request_id,
        vec![item("a", Some("Index")), item("b", Some("Motif"))],
        Some("c1"),
    );

    let tally: Vec<_> = state
        .album_tally()
        .into_iter()
        .map(|entry| (entry.name, entry.count))
        .collect();
    assert_eq!(
        tally,
        vec![
            ("all".to_string(), 2),
            ("index".to_string(), 1),
            ("motif".to_string(), 1),
        ]
    );
    let visible: Vec<_> = state.visible_items().map(|i| i.public_id.as_str()).collect();
    assert_eq!(visible, vec!["a", "b"]);
    assert_eq!(state.next_cursor(), Some("c1"));
    assert!(!state.reached_end());
    assert!(!state.is_loading());
    assert!(state.consume_dirty());
}

#[test]
fn empty_last_page_exhausts_the_loader() {
    init_logging();
    let (state, first, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let state = deliver(state, first, vec![item("a", Some("index"))], Some("c1"));

    let (state, second, cursor) =
        expect_fetch(state, Msg::SentinelVisibility { intersecting: true });
    assert_eq!(cursor.as_deref(), Some("c1"));
    let state = deliver(state, second, Vec::new(), None);

    assert!(state.reached_end());
    assert_eq!(state.next_cursor(), None);
    assert_eq!(state.items().len(), 1);

    let (state, effects) = update(state, Msg::LoadMore);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::SentinelVisibility { intersecting: true });
    assert!(effects.is_empty());
    assert!(state.view().reached_end);
}

#[test]
fn empty_string_cursor_counts_as_exhausted() {
    let (state, first, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let state = deliver(state, first, vec![item("a", None)], Some(""));
    assert!(state.reached_end());
}

#[test]
fn pages_append_in_arrival_order() {
    init_logging();
    let pages = vec![
        (vec![item("a", Some("set")), item("b", None)], Some("c1")),
        (vec![item("c", Some("vector"))], Some("c2")),
        (vec![item("d", Some("set")), item("e", Some("motif"))], None),
    ];

    let mut state = GalleryState::new();
    let mut expected = Vec::new();
    for (items, next_cursor) in pages {
        let (next, request_id, _) = expect_fetch(state, Msg::LoadMore);
        expected.extend(items.clone());
        state = deliver(next, request_id, items, next_cursor);
    }

    assert_eq!(state.items(), expected.as_slice());
    assert!(state.reached_end());
}

#[test]
fn failed_page_keeps_items_and_allows_retry() {
    init_logging();
    let (state, first, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let mut state = deliver(state, first, vec![item("a", Some("index"))], Some("c1"));
    assert!(state.consume_dirty());
    let before = state.items().to_vec();

    let (state, second, cursor) = expect_fetch(state, Msg::LoadMore);
    assert_eq!(cursor.as_deref(), Some("c1"));
    let (mut state, effects) = update(
        state,
        Msg::PageFailed {
            request_id: second,
            message: "http status 502".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.items(), before.as_slice());
    assert!(!state.is_loading());
    assert!(!state.reached_end());
    assert_eq!(state.next_cursor(), Some("c1"));
    assert!(!state.consume_dirty());

    let (state, third, cursor) = expect_fetch(state, Msg::LoadMore);
    assert_eq!(cursor.as_deref(), Some("c1"));
    assert_ne!(third, second);
    let state = deliver(state, third, vec![item("b", Some("motif"))], None);

    let ids: Vec<_> = state.items().iter().map(|i| i.public_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn responses_for_other_requests_are_ignored() {
    init_logging();
    let (state, request_id, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: request_id + 7,
            items: vec![item("ghost", None)],
            next_cursor: None,
        },
    );
    assert!(state.items().is_empty());
    assert!(state.is_loading());

    let (state, _) = update(
        state,
        Msg::PageFailed {
            request_id: request_id + 7,
            message: "late".to_string(),
        },
    );
    assert!(state.is_loading());
}

#[test]
fn reload_starts_over_and_drops_stale_answers() {
    init_logging();
    let (state, first, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let state = deliver(state, first, vec![item("a", Some("index"))], None);
    let (state, _) = update(state, Msg::AlbumSelected("index".to_string()));
    assert!(state.reached_end());

    let (state, second, cursor) = expect_fetch(state, Msg::Reload);
    assert_eq!(cursor, None);
    assert!(second > first);
    assert!(state.items().is_empty());
    assert!(!state.reached_end());
    assert_eq!(state.view().active_album, "all");

    // An answer to the pre-reload request must not leak in.
    let state = deliver(state, first, vec![item("stale", None)], None);
    assert!(state.items().is_empty());
    assert!(state.is_loading());

    let state = deliver(state, second, vec![item("fresh", None)], Some("c9"));
    assert_eq!(state.items()[0].public_id, "fresh");
}

#[test]
fn reload_while_loading_issues_new_request() {
    let (state, first, _) = expect_fetch(GalleryState::new(), Msg::LoadMore);
    let (_state, second, _) = expect_fetch(state, Msg::Reload);
    assert_eq!(second, first + 1);
}
