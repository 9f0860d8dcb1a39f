pub type RequestId = u64;

/// Album tag for items the server could not classify.
pub const UNKNOWN_ALBUM: &str = "unknown";

/// One generated image as known to the gallery.
///
/// `album` is always normalized (see [`normalize_album`]); build items with
/// [`GalleryItem::new`] and the `with_*` setters to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub public_id: String,
    pub url: String,
    pub prompt: String,
    pub album: String,
    pub created_at: String,
}

impl GalleryItem {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
            prompt: String::new(),
            album: UNKNOWN_ALBUM.to_string(),
            created_at: String::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_album(mut self, album: Option<&str>) -> Self {
        self.album = normalize_album(album);
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }
}

/// Lowercases an album tag. Missing, blank and the reserved `all` tag map to
/// [`UNKNOWN_ALBUM`].
pub fn normalize_album(raw: Option<&str>) -> String {
    let tag = raw.map(str::trim).unwrap_or_default().to_lowercase();
    if tag.is_empty() || tag == crate::ALL_ALBUMS {
        UNKNOWN_ALBUM.to_string()
    } else {
        tag
    }
}
