//! Gallery core: pure loader state machine and view-model helpers.
mod album;
mod effect;
mod item;
mod msg;
mod state;
mod update;
mod view_model;

pub use album::{album_label, album_tally, AlbumCount, AlbumFilter, ALL_ALBUMS, KNOWN_ALBUM_ORDER};
pub use effect::Effect;
pub use item::{normalize_album, GalleryItem, RequestId, UNKNOWN_ALBUM};
pub use msg::Msg;
pub use state::{GalleryState, PAGE_SIZE};
pub use update::update;
pub use view_model::{
    AlbumEntryView, CardView, DetailView, GalleryViewModel, EMPTY_GALLERY_MESSAGE,
    NO_PROMPT_CAPTION,
};
