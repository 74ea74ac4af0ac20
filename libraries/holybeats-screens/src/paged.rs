//! Accumulated pages of the "all tracks" collection

use holybeats_core::{Track, TrackPage, TrackQuery};

/// Pages loaded so far for one filter combination
///
/// A new filter is a new collection: it replaces everything. Further pages
/// of the same filter are appended in request order. Whether more pages
/// exist comes from the server's `has_more` flag alone; the total count is
/// informational.
#[derive(Debug, Clone)]
pub struct PagedTracks {
    query: TrackQuery,
    tracks: Vec<Track>,
    has_more: bool,
    total_count: Option<u64>,
}

impl PagedTracks {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: TrackQuery::first_page(page_size),
            tracks: Vec::new(),
            has_more: false,
            total_count: None,
        }
    }

    /// Query of the last page applied
    pub fn query(&self) -> &TrackQuery {
        &self.query
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Start over with `page` as the only loaded page
    pub fn replace(&mut self, query: TrackQuery, page: TrackPage) {
        self.query = query;
        self.tracks = page.items;
        self.has_more = page.has_more;
        self.total_count = page.total_count;
    }

    /// Append the page directly following the last one
    ///
    /// Returns `false` (and changes nothing) when `query` is for another
    /// filter or not the next page.
    pub fn append(&mut self, query: TrackQuery, page: TrackPage) -> bool {
        if !query.same_filter(&self.query) || query.page != self.query.page + 1 {
            return false;
        }
        self.query = query;
        self.tracks.extend(page.items);
        self.has_more = page.has_more;
        self.total_count = page.total_count;
        true
    }

    /// Query for the next page, if the server said there is one
    pub fn next_query(&self) -> Option<TrackQuery> {
        self.has_more.then(|| self.query.next_page())
    }
}
