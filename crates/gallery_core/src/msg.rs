#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Explicit request for the next page (initial load on page boot).
    LoadMore,
    /// Scroll sentinel visibility changed.
    SentinelVisibility { intersecting: bool },
    /// The page source answered a fetch.
    PageLoaded {
        request_id: crate::RequestId,
        items: Vec<crate::GalleryItem>,
        next_cursor: Option<String>,
    },
    /// The page source failed a fetch.
    PageFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// User picked an album in the sidebar.
    AlbumSelected(String),
    /// User clicked "Show all".
    ShowAllClicked,
    /// User edited the album search box.
    SearchChanged(String),
    /// User opened a card in the detail view.
    CardSelected { public_id: String },
    /// User dismissed the detail view.
    DetailClosed,
    /// Throw away everything loaded and start again from the first page.
    Reload,
}
