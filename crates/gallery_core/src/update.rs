use gallery_logging::{gallery_debug, gallery_warn};

use crate::{AlbumFilter, Effect, GalleryState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: GalleryState, msg: Msg) -> (GalleryState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadMore | Msg::SentinelVisibility { intersecting: true } => {
            // The in-flight guard is the only debounce the sentinel gets.
            state.begin_fetch().into_iter().collect()
        }
        Msg::SentinelVisibility { intersecting: false } => Vec::new(),
        Msg::PageLoaded {
            request_id,
            items,
            next_cursor,
        } => {
            let count = items.len();
            if state.apply_page(request_id, items, next_cursor) {
                gallery_debug!(
                    "Page {} appended {} items (total {}, end={})",
                    request_id,
                    count,
                    state.items().len(),
                    state.reached_end()
                );
            } else {
                gallery_debug!("Ignoring stale page response {}", request_id);
            }
            Vec::new()
        }
        Msg::PageFailed {
            request_id,
            message,
        } => {
            if state.apply_failure(request_id) {
                gallery_warn!("Gallery load failed (request {}): {}", request_id, message);
            } else {
                gallery_debug!("Ignoring stale page failure {}: {}", request_id, message);
            }
            Vec::new()
        }
        Msg::AlbumSelected(raw) => {
            state.set_album_filter(AlbumFilter::parse(&raw));
            Vec::new()
        }
        Msg::ShowAllClicked => {
            state.set_album_filter(AlbumFilter::All);
            Vec::new()
        }
        Msg::SearchChanged(raw) => {
            state.set_search(&raw);
            Vec::new()
        }
        Msg::CardSelected { public_id } => {
            if !state.select(public_id) {
                gallery_debug!("Card selection ignored: unknown item");
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            state.clear_selection();
            Vec::new()
        }
        Msg::Reload => {
            state.reset();
            state.begin_fetch().into_iter().collect()
        }
    };

    (state, effects)
}
