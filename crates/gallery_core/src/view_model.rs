use crate::album::album_label;
use crate::{GalleryItem, GalleryState};

/// Caption shown for items generated without a saved prompt.
pub const NO_PROMPT_CAPTION: &str = "(no saved prompt)";

/// Placeholder shown when no card passes the filter.
pub const EMPTY_GALLERY_MESSAGE: &str = "No photos yet.";

const ALT_TEXT_MAX_CHARS: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryViewModel {
    pub cards: Vec<CardView>,
    pub albums: Vec<AlbumEntryView>,
    pub active_album: String,
    pub search: String,
    pub total_items: usize,
    pub loading: bool,
    pub reached_end: bool,
    pub empty_message: Option<String>,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Position among the visible cards, starting at 0.
    pub index: usize,
    pub public_id: String,
    pub url: String,
    pub album: String,
    pub prompt: String,
    pub caption: String,
    pub alt_text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumEntryView {
    pub name: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub public_id: String,
    pub url: String,
    pub prompt: String,
    pub album: String,
    pub created_at: String,
}

impl GalleryViewModel {
    pub(crate) fn build(state: &GalleryState) -> Self {
        let active_album = state.album_filter().as_str().to_string();

        let cards: Vec<CardView> = state
            .visible_items()
            .enumerate()
            .map(|(index, item)| CardView::from_item(index, item))
            .collect();

        let albums = state
            .listed_albums()
            .into_iter()
            .map(|entry| AlbumEntryView {
                label: album_label(&entry.name),
                active: entry.name == active_album,
                name: entry.name,
                count: entry.count,
            })
            .collect();

        let empty_message = cards
            .is_empty()
            .then(|| EMPTY_GALLERY_MESSAGE.to_string());

        Self {
            cards,
            albums,
            active_album,
            search: state.search().to_string(),
            total_items: state.items().len(),
            loading: state.is_loading(),
            reached_end: state.reached_end(),
            empty_message,
            detail: state.selected_item().map(DetailView::from_item),
        }
    }
}

impl CardView {
    fn from_item(index: usize, item: &GalleryItem) -> Self {
        let prompt = item.prompt.trim();
        let caption = if prompt.is_empty() {
            NO_PROMPT_CAPTION.to_string()
        } else {
            prompt.to_string()
        };
        let alt_text = if prompt.is_empty() {
            format!("jewelry {}", index + 1)
        } else {
            prompt.chars().take(ALT_TEXT_MAX_CHARS).collect()
        };
        Self {
            index,
            public_id: item.public_id.clone(),
            url: item.url.clone(),
            album: item.album.clone(),
            prompt: prompt.to_string(),
            caption,
            alt_text,
            created_at: item.created_at.clone(),
        }
    }
}

impl DetailView {
    fn from_item(item: &GalleryItem) -> Self {
        let prompt = item.prompt.trim();
        Self {
            public_id: item.public_id.clone(),
            url: item.url.clone(),
            prompt: if prompt.is_empty() {
                NO_PROMPT_CAPTION.to_string()
            } else {
                prompt.to_string()
            },
            album: item.album.clone(),
            created_at: item.created_at.clone(),
        }
    }
}
