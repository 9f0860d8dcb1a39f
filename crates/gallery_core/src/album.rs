use std::collections::BTreeMap;

use crate::GalleryItem;

/// Synthetic album meaning "no filter".
pub const ALL_ALBUMS: &str = "all";

/// Preferred sidebar order for the albums produced by the generation flows.
pub const KNOWN_ALBUM_ORDER: [&str; 7] = [
    "index",
    "set",
    "vector",
    "variants",
    "motif",
    "inspiration",
    "unknown",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AlbumFilter {
    #[default]
    All,
    Album(String),
}

impl AlbumFilter {
    /// Parses user input. Blank input and `all` clear the filter.
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() || tag == ALL_ALBUMS {
            Self::All
        } else {
            Self::Album(tag)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_ALBUMS,
            Self::Album(tag) => tag,
        }
    }

    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            Self::All => true,
            Self::Album(tag) => item.album == *tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCount {
    pub name: String,
    pub count: usize,
}

impl AlbumCount {
    fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Counts items per album.
///
/// The first entry is always `all` with the total. Known albums follow in
/// [`KNOWN_ALBUM_ORDER`], then any other tag in lexicographic order.
pub fn album_tally(items: &[GalleryItem]) -> Vec<AlbumCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item.album.as_str()).or_default() += 1;
    }

    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap's lexicographic order among unknown tags.
    entries.sort_by_key(|(name, _)| album_rank(name));

    let mut tally = Vec::with_capacity(entries.len() + 1);
    tally.push(AlbumCount::new(ALL_ALBUMS, items.len()));
    tally.extend(
        entries
            .into_iter()
            .map(|(name, count)| AlbumCount::new(name, count)),
    );
    tally
}

/// Sidebar label: first character uppercased.
pub fn album_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn album_rank(name: &str) -> usize {
    KNOWN_ALBUM_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(KNOWN_ALBUM_ORDER.len())
}
