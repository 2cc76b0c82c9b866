//! Single-movie page with edit and delete actions.

use tracing::{debug, info, warn};

use crate::client::MovieClient;
use crate::effect::{
    Effect, Outcome, RequestToken, TokenIssuer, DELETE_PROMPT, DELETE_REJECTED, DELETE_UNREACHABLE,
};
use crate::error::ApiError;
use crate::route::Route;
use crate::types::{Movie, MovieId};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Movie),
    NotFound,
    Failed(String),
}

#[derive(Debug)]
pub struct DetailView {
    client: MovieClient,
    tokens: TokenIssuer,
    id: Option<MovieId>,
    state: DetailState,
    latest_fetch: Option<RequestToken>,
    awaiting_confirmation: bool,
    deleting: Option<RequestToken>,
}

impl DetailView {
    pub fn new(client: MovieClient, tokens: TokenIssuer) -> Self {
        Self {
            client,
            tokens,
            id: None,
            state: DetailState::Loading,
            latest_fetch: None,
            awaiting_confirmation: false,
            deleting: None,
        }
    }

    pub fn mount(&mut self, id: MovieId) -> Vec<Effect> {
        let token = self.tokens.issue();
        let request = self.client.build_get_movie(&id);
        self.id = Some(id);
        self.state = DetailState::Loading;
        self.latest_fetch = Some(token);
        vec![Effect::request(token, request)]
    }

    pub fn request_delete(&mut self) -> Vec<Effect> {
        if !matches!(self.state, DetailState::Loaded(_)) || self.deleting.is_some() {
            return Vec::new();
        }
        self.awaiting_confirmation = true;
        vec![Effect::Confirm {
            prompt: DELETE_PROMPT.to_string(),
        }]
    }

    pub fn confirm(&mut self, accepted: bool) -> Vec<Effect> {
        let asked = std::mem::take(&mut self.awaiting_confirmation);
        match (&self.id, asked && accepted) {
            (Some(id), true) => {
                let token = self.tokens.issue();
                self.deleting = Some(token);
                vec![Effect::request(token, self.client.build_delete_movie(id))]
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_response(&mut self, token: RequestToken, outcome: Outcome) -> Vec<Effect> {
        if self.latest_fetch == Some(token) {
            self.latest_fetch = None;
            self.state = match outcome.and_then(|response| self.client.parse_get_movie(response)) {
                Ok(movie) => DetailState::Loaded(movie),
                Err(ApiError::NotFound) => DetailState::NotFound,
                Err(err) => {
                    warn!(id = ?self.id, error = %err, "error fetching movie");
                    DetailState::Failed(err.to_string())
                }
            };
            return Vec::new();
        }
        if self.deleting == Some(token) {
            self.deleting = None;
            return match outcome.and_then(|response| self.client.parse_delete_movie(response)) {
                Ok(()) => {
                    info!(id = ?self.id, "movie deleted");
                    vec![
                        Effect::Notice("Movie deleted successfully!".to_string()),
                        Effect::Navigate(Route::movies()),
                    ]
                }
                Err(err) => {
                    warn!(id = ?self.id, error = %err, "error deleting movie");
                    vec![Effect::Alert(err.alert_message(DELETE_REJECTED, DELETE_UNREACHABLE))]
                }
            };
        }
        debug!(%token, "discarding stale detail response");
        Vec::new()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn movie(&self) -> Option<&Movie> {
        match &self.state {
            DetailState::Loaded(movie) => Some(movie),
            _ => None,
        }
    }

    pub fn edit_route(&self) -> Option<Route> {
        self.movie().map(|movie| Route::EditMovie(movie.id.clone()))
    }

    /// "Back to Movies".
    pub fn back(&self) -> Vec<Effect> {
        vec![Effect::Navigate(Route::movies())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::views::test_support::*;

    fn mounted(id: &str) -> (DetailView, RequestToken) {
        let mut view = DetailView::new(client(), TokenIssuer::default());
        let effects = view.mount(MovieId::new(id));
        let Effect::Request { token, request } = &effects[0] else {
            panic!("expected request, got {effects:?}");
        };
        assert_eq!(request.url, format!("{BASE}/api/movies/{id}"));
        (view, *token)
    }

    fn loaded(id: &str) -> DetailView {
        let (mut view, token) = mounted(id);
        view.handle_response(token, Ok(HttpResponse::new(200, movie_json(id, "Heat"))));
        view
    }

    fn confirmed_delete(view: &mut DetailView) -> RequestToken {
        assert!(matches!(&view.request_delete()[..], [Effect::Confirm { .. }]));
        let effects = view.confirm(true);
        let Effect::Request { token, request } = &effects[0] else {
            panic!("expected request, got {effects:?}");
        };
        assert_eq!(request.method, HttpMethod::Delete);
        *token
    }

    #[test]
    fn starts_loading_then_shows_movie() {
        let (mut view, token) = mounted("7");
        assert_eq!(view.state(), &DetailState::Loading);
        view.handle_response(token, Ok(HttpResponse::new(200, movie_json("7", "Heat"))));
        assert_eq!(view.movie().unwrap().title, "Heat");
        assert_eq!(view.edit_route(), Some(Route::EditMovie(MovieId::new("7"))));
    }

    #[test]
    fn missing_movie_renders_not_found() {
        let (mut view, token) = mounted("404");
        view.handle_response(token, Ok(HttpResponse::new(404, "")));
        assert_eq!(view.state(), &DetailState::NotFound);
        assert_eq!(view.back(), vec![Effect::Navigate(Route::movies())]);
    }

    #[test]
    fn transport_failure_renders_error() {
        let (mut view, token) = mounted("7");
        view.handle_response(token, Err(ApiError::Transport("refused".into())));
        assert!(matches!(view.state(), DetailState::Failed(_)));
        assert!(view.request_delete().is_empty());
    }

    #[test]
    fn remount_ignores_previous_movie() {
        let (mut view, first) = mounted("1");
        let effects = view.mount(MovieId::new("2"));
        let Effect::Request { token: second, .. } = effects[0].clone() else {
            panic!("expected request");
        };
        view.handle_response(second, Ok(HttpResponse::new(200, movie_json("2", "Two"))));
        view.handle_response(first, Ok(HttpResponse::new(200, movie_json("1", "One"))));
        assert_eq!(view.movie().unwrap().title, "Two");
    }

    #[test]
    fn declined_confirmation_sends_nothing() {
        let mut view = loaded("7");
        view.request_delete();
        assert!(view.confirm(false).is_empty());
    }

    #[test]
    fn successful_delete_navigates_to_list() {
        let mut view = loaded("7");
        let token = confirmed_delete(&mut view);
        let effects = view.handle_response(token, Ok(HttpResponse::new(200, "{}")));
        assert_eq!(effects.last(), Some(&Effect::Navigate(Route::movies())));
    }

    #[test]
    fn failed_delete_keeps_movie_and_alerts() {
        let mut view = loaded("7");
        let token = confirmed_delete(&mut view);
        let effects = view.handle_response(token, Ok(HttpResponse::new(500, "")));
        assert_eq!(effects, vec![Effect::Alert("Failed to delete movie".to_string())]);
        assert_eq!(view.movie().unwrap().id, MovieId::new("7"));
    }

    #[test]
    fn unreachable_server_on_delete_asks_to_retry() {
        let mut view = loaded("7");
        let token = confirmed_delete(&mut view);
        let effects = view.handle_response(token, Err(ApiError::Transport("reset".into())));
        assert_eq!(
            effects,
            vec![Effect::Alert("Error deleting movie. Please try again.".to_string())]
        );
        assert!(matches!(&view.request_delete()[..], [Effect::Confirm { .. }]));
    }
}
