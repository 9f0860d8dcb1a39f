use crate::album::{album_tally, AlbumCount, AlbumFilter};
use crate::view_model::GalleryViewModel;
use crate::{Effect, GalleryItem, RequestId};

/// Page size requested from the image list endpoint.
pub const PAGE_SIZE: u32 = 30;

/// Loader state for one gallery view.
///
/// `items` only ever grows, and at most one page request is in flight. Once
/// the server stops handing out cursors the loader stays exhausted until
/// [`crate::Msg::Reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    items: Vec<GalleryItem>,
    album_filter: AlbumFilter,
    search: String,
    next_cursor: Option<String>,
    in_flight: Option<RequestId>,
    reached_end: bool,
    selected: Option<String>,
    page_size: u32,
    last_request_id: RequestId,
    dirty: bool,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            album_filter: AlbumFilter::All,
            search: String::new(),
            next_cursor: None,
            in_flight: None,
            reached_end: false,
            selected: None,
            page_size: page_size.max(1),
            last_request_id: 0,
            dirty: false,
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn album_filter(&self) -> &AlbumFilter {
        &self.album_filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn selected_item(&self) -> Option<&GalleryItem> {
        let public_id = self.selected.as_deref()?;
        self.items.iter().find(|item| item.public_id == public_id)
    }

    /// Items passing the album filter, in arrival order.
    pub fn visible_items(&self) -> impl Iterator<Item = &GalleryItem> + '_ {
        self.items
            .iter()
            .filter(move |item| self.album_filter.matches(item))
    }

    pub fn album_tally(&self) -> Vec<AlbumCount> {
        album_tally(&self.items)
    }

    /// Tally entries whose name contains the search text, ignoring case.
    pub fn listed_albums(&self) -> Vec<AlbumCount> {
        let needle = self.search.to_lowercase();
        self.album_tally()
            .into_iter()
            .filter(|entry| needle.is_empty() || entry.name.contains(&needle))
            .collect()
    }

    pub fn view(&self) -> GalleryViewModel {
        GalleryViewModel::build(self)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a page request unless one is in flight or pagination is done.
    pub(crate) fn begin_fetch(&mut self) -> Option<Effect> {
        if self.in_flight.is_some() || self.reached_end {
            return None;
        }
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(request_id);
        Some(Effect::FetchPage {
            request_id,
            cursor: self.next_cursor.clone(),
            limit: self.page_size,
        })
    }

    /// Appends a page. Returns false for responses to a request that is no
    /// longer in flight.
    pub(crate) fn apply_page(
        &mut self,
        request_id: RequestId,
        items: Vec<GalleryItem>,
        next_cursor: Option<String>,
    ) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.items.extend(items);
        self.next_cursor = next_cursor.filter(|cursor| !cursor.is_empty());
        self.reached_end = self.next_cursor.is_none();
        self.mark_dirty();
        true
    }

    /// Clears the in-flight request; loaded items are untouched.
    pub(crate) fn apply_failure(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub(crate) fn set_album_filter(&mut self, filter: AlbumFilter) {
        self.album_filter = filter;
        self.mark_dirty();
    }

    pub(crate) fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_string();
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, public_id: String) -> bool {
        if !self.items.iter().any(|item| item.public_id == public_id) {
            return false;
        }
        self.selected = Some(public_id);
        self.mark_dirty();
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Back to a fresh loader. The request counter survives so that answers
    /// to requests issued before the reset are recognized as stale.
    pub(crate) fn reset(&mut self) {
        let last_request_id = self.last_request_id;
        *self = Self::with_page_size(self.page_size);
        self.last_request_id = last_request_id;
        self.mark_dirty();
    }
}
