/// Track listing queries, pages and collection identity
use crate::types::{PlaylistId, Track};
use serde::{Deserialize, Serialize};

/// Default number of tracks per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters of one "all tracks" request
///
/// Pages start at 1. An absent filter means no filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackQuery {
    pub page: u32,
    pub page_size: u32,
    pub genre: Option<String>,
    pub language: Option<String>,
}

impl TrackQuery {
    /// Unfiltered first page
    pub fn first_page(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            genre: None,
            language: None,
        }
    }

    /// Set the genre filter; empty or blank means "all genres"
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = normalize_filter(genre.into());
        self
    }

    /// Set the language filter; empty or blank means "all languages"
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = normalize_filter(language.into());
        self
    }

    /// Same filters, following page
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    /// Same filters, back at page 1
    #[must_use]
    pub fn reset_page(&self) -> Self {
        Self {
            page: 1,
            ..self.clone()
        }
    }

    /// Whether both queries describe the same filter combination
    pub fn same_filter(&self, other: &Self) -> bool {
        self.page_size == other.page_size
            && self.genre == other.genre
            && self.language == other.language
    }
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

fn normalize_filter(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One page of the "all tracks" listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPage {
    pub items: Vec<Track>,

    /// Server-authoritative continuation flag; drives "load more"
    #[serde(default)]
    pub has_more: bool,

    /// Total matching tracks, informational only
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Filter values offered by the catalogue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFilters {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Identity of a logical track collection, independent of filters or pages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKey {
    /// The "all tracks" library view
    Library,
    /// One playlist's tracks
    Playlist(PlaylistId),
    /// The signed-in user's favorites
    Favorites,
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
            Self::Playlist(id) => write!(f, "playlist:{}", id),
            Self::Favorites => write!(f, "favorites"),
        }
    }
}

impl CollectionKey {
    /// Whether reading this collection requires a signed-in user
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_means_no_filter() {
        let query = TrackQuery::first_page(20).with_genre("").with_language("  ");
        assert!(query.genre.is_none());
        assert!(query.language.is_none());
    }

    #[test]
    fn next_page_keeps_filters() {
        let query = TrackQuery::first_page(10).with_genre("rock");
        let next = query.next_page();
        assert_eq!(next.page, 2);
        assert!(next.same_filter(&query));
        assert_eq!(next.reset_page(), query);
    }

    #[test]
    fn different_genre_is_a_different_filter() {
        let all = TrackQuery::first_page(20);
        let rock = all.clone().with_genre("rock");
        assert!(!all.same_filter(&rock));
    }

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(TrackQuery::first_page(0).page_size, 1);
    }

    #[test]
    fn page_tolerates_missing_total() {
        let page: TrackPage = serde_json::from_str(r#"{"items": [], "hasMore": true}"#).unwrap();
        assert!(page.has_more);
        assert!(page.total_count.is_none());
    }

    #[test]
    fn only_library_is_public() {
        assert!(!CollectionKey::Library.requires_auth());
        assert!(CollectionKey::Favorites.requires_auth());
        assert!(CollectionKey::Playlist(PlaylistId::new("1")).requires_auth());
    }
}
