//! Landing page: a strip of featured movies.

use tracing::{debug, warn};

use crate::client::MovieClient;
use crate::effect::{Effect, Outcome, RequestToken, TokenIssuer};
use crate::types::Movie;

#[derive(Debug)]
pub struct HomeView {
    client: MovieClient,
    tokens: TokenIssuer,
    featured: Vec<Movie>,
    latest_fetch: Option<RequestToken>,
}

impl HomeView {
    pub fn new(client: MovieClient, tokens: TokenIssuer) -> Self {
        Self {
            client,
            tokens,
            featured: Vec::new(),
            latest_fetch: None,
        }
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        let token = self.tokens.issue();
        self.latest_fetch = Some(token);
        vec![Effect::request(token, self.client.build_featured_movies())]
    }

    pub fn handle_response(&mut self, token: RequestToken, outcome: Outcome) -> Vec<Effect> {
        if self.latest_fetch != Some(token) {
            debug!(%token, "discarding stale featured response");
            return Vec::new();
        }
        self.latest_fetch = None;
        match outcome.and_then(|response| self.client.parse_list_movies(response)) {
            Ok(page) => self.featured = page.data,
            Err(err) => warn!(error = %err, "error fetching featured movies"),
        }
        Vec::new()
    }

    pub fn featured(&self) -> &[Movie] {
        &self.featured
    }

    pub fn is_loading(&self) -> bool {
        self.latest_fetch.is_some()
    }
}
