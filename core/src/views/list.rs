//! Paginated, searchable, genre-filtered movie listing.
//!
//! # Design
//! The view owns a `ListQuery` that always equals what the location bar
//! says. Every user-initiated change emits `UpdateUrl` together with a fresh
//! `Request`, never one without the other. Location changes that come from
//! outside (header search, back/forward) go through `sync_from_url`, which
//! re-derives the query and re-fetches only when it actually changed.
//!
//! Only the most recently issued listing request may update the visible
//! page. Anything older is dropped when it arrives.

use tracing::{debug, info, warn};

use crate::client::MovieClient;
use crate::effect::{
    Effect, Outcome, RequestToken, TokenIssuer, DELETE_PROMPT, DELETE_REJECTED, DELETE_UNREACHABLE,
};
use crate::query::{total_pages, ListQuery};
use crate::types::{Genre, Movie, MovieId};

/// State of the Previous / page-number / Next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// The controls are only shown when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_pages
    }
}

#[derive(Debug)]
pub struct ListView {
    client: MovieClient,
    tokens: TokenIssuer,
    query: ListQuery,
    movies: Vec<Movie>,
    /// Server-side match count from the last applied page.
    total: Option<u64>,
    /// Filters `total` was counted for, at page 1.
    counted_for: Option<ListQuery>,
    /// Why the latest listing request failed, until one succeeds.
    fetch_error: Option<String>,
    latest_fetch: Option<RequestToken>,
    awaiting_confirmation: Option<MovieId>,
    deleting: Option<(RequestToken, MovieId)>,
}

impl ListView {
    pub fn new(client: MovieClient, tokens: TokenIssuer) -> Self {
        Self {
            client,
            tokens,
            query: ListQuery::default(),
            movies: Vec::new(),
            total: None,
            counted_for: None,
            fetch_error: None,
            latest_fetch: None,
            awaiting_confirmation: None,
            deleting: None,
        }
    }

    /// First render for a location: adopt its query and fetch.
    pub fn mount(&mut self, query: ListQuery) -> Vec<Effect> {
        self.query = query;
        self.fetch_movies()
    }

    /// The location changed underneath the view.
    pub fn sync_from_url(&mut self, query: ListQuery) -> Vec<Effect> {
        if query == self.query {
            return Vec::new();
        }
        debug!(from = %self.query.to_query_string(), to = %query.to_query_string(), "list query re-derived from location");
        self.mount(query)
    }

    /// Submit the search box. Blank input clears an active search and is
    /// otherwise ignored.
    pub fn apply_search(&mut self, text: &str) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() && self.query.search.is_empty() {
            return Vec::new();
        }
        self.query.search = text.to_string();
        self.query.page = 1;
        self.commit()
    }

    /// Select a genre (`None` clears it). The search text is kept.
    pub fn apply_genre(&mut self, genre: Option<Genre>) -> Vec<Effect> {
        self.query.genre = genre;
        self.query.page = 1;
        self.commit()
    }

    /// Jump to page `page`, clamped to the pages reported for the current
    /// filters. While their count is unknown only the lower bound applies.
    pub fn change_page(&mut self, page: u32) -> Vec<Effect> {
        let last = self.known_total().map(total_pages).unwrap_or(u32::MAX).max(1);
        let page = page.clamp(1, last);
        if page == self.query.page {
            return Vec::new();
        }
        self.query.page = page;
        self.commit()
    }

    pub fn next_page(&mut self) -> Vec<Effect> {
        self.change_page(self.query.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Vec<Effect> {
        self.change_page(self.query.page.saturating_sub(1))
    }

    pub fn clear_filters(&mut self) -> Vec<Effect> {
        self.query = ListQuery::default();
        self.commit()
    }

    /// Issue a listing request for the current query. Any request issued
    /// earlier becomes stale.
    pub fn fetch_movies(&mut self) -> Vec<Effect> {
        let token = self.tokens.issue();
        self.latest_fetch = Some(token);
        vec![Effect::request(token, self.client.build_list_movies(&self.query))]
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: MovieId) -> Vec<Effect> {
        self.awaiting_confirmation = Some(id);
        vec![Effect::Confirm {
            prompt: DELETE_PROMPT.to_string(),
        }]
    }

    /// The user's answer to the last `Confirm`.
    pub fn confirm(&mut self, accepted: bool) -> Vec<Effect> {
        let Some(id) = self.awaiting_confirmation.take() else {
            return Vec::new();
        };
        if !accepted {
            return Vec::new();
        }
        let token = self.tokens.issue();
        let request = self.client.build_delete_movie(&id);
        self.deleting = Some((token, id));
        vec![Effect::request(token, request)]
    }

    pub fn handle_response(&mut self, token: RequestToken, outcome: Outcome) -> Vec<Effect> {
        if self.latest_fetch == Some(token) {
            self.latest_fetch = None;
            self.apply_page(outcome);
            return Vec::new();
        }
        if let Some((_, id)) = self.deleting.take_if(|(pending, _)| *pending == token) {
            return self.finish_delete(id, outcome);
        }
        debug!(%token, "discarding stale list response");
        Vec::new()
    }

    fn apply_page(&mut self, outcome: Outcome) {
        match outcome.and_then(|response| self.client.parse_list_movies(response)) {
            Ok(page) => {
                debug!(count = page.data.len(), total = page.total, "movie page loaded");
                self.movies = page.data;
                self.total = Some(page.total);
                self.counted_for = Some(filters_of(&self.query));
                self.fetch_error = None;
            }
            // The previous page stays on screen.
            Err(err) => {
                warn!(error = %err, query = %self.query.to_query_string(), "error fetching movies");
                self.fetch_error = Some(err.to_string());
            }
        }
    }

    fn finish_delete(&mut self, id: MovieId, outcome: Outcome) -> Vec<Effect> {
        match outcome.and_then(|response| self.client.parse_delete_movie(response)) {
            Ok(()) => {
                info!(%id, "movie deleted");
                let mut effects = vec![Effect::Notice("Movie deleted successfully!".to_string())];
                effects.extend(self.fetch_movies());
                effects
            }
            Err(err) => {
                warn!(%id, error = %err, "error deleting movie");
                vec![Effect::Alert(err.alert_message(DELETE_REJECTED, DELETE_UNREACHABLE))]
            }
        }
    }

    fn commit(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::UpdateUrl(self.query.to_location())];
        effects.extend(self.fetch_movies());
        effects
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Pages for the current filters; 0 until they have been counted.
    pub fn total_pages(&self) -> u32 {
        self.known_total().map(total_pages).unwrap_or(0)
    }

    fn known_total(&self) -> Option<u64> {
        let current = filters_of(&self.query);
        self.total.filter(|_| self.counted_for.as_ref() == Some(&current))
    }

    /// The latest listing request failed; what is on screen (if anything)
    /// is from an earlier one.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.latest_fetch.is_some()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current: self.query.page,
            total_pages: self.total_pages(),
        }
    }

    /// The server answered and nothing matched: the view offers
    /// `clear_filters` instead of a grid. A failed or pending fetch is never
    /// the empty state.
    pub fn is_empty_state(&self) -> bool {
        !self.is_loading()
            && self.fetch_error.is_none()
            && self.total.is_some()
            && self.movies.is_empty()
    }

    pub fn has_active_filters(&self) -> bool {
        self.query.has_filters()
    }
}

fn filters_of(query: &ListQuery) -> ListQuery {
    ListQuery {
        page: 1,
        ..query.clone()
    }
}
