//! The routing shell: owns the location and the one mounted view.
//!
//! `open` is called for every location change the user makes outside the
//! list view's own controls (typing a URL, back/forward, header search,
//! `Navigate` effects). Staying on `/movies` with a different query re-syncs
//! the mounted list instead of remounting it.

use tracing::debug;

use crate::client::MovieClient;
use crate::effect::{Effect, Outcome, RequestToken, TokenIssuer};
use crate::route::{header_search, Route};
use crate::views::{DetailView, FormMode, FormView, HomeView, ListView};

#[derive(Debug)]
pub enum View {
    Home(HomeView),
    List(ListView),
    Detail(DetailView),
    Form(FormView),
    NotFound(String),
}

#[derive(Debug)]
pub struct App {
    client: MovieClient,
    tokens: TokenIssuer,
    location: String,
    view: View,
}

impl App {
    pub fn new(client: MovieClient) -> Self {
        Self {
            client,
            tokens: TokenIssuer::default(),
            location: String::new(),
            view: View::NotFound(String::new()),
        }
    }

    pub fn open(&mut self, location: &str) -> Vec<Effect> {
        let route = Route::parse(location);
        debug!(location, ?route, "opening location");
        self.location = route.to_path();

        if let (Route::Movies(query), View::List(list)) = (&route, &mut self.view) {
            return list.sync_from_url(query.clone());
        }

        let (view, effects) = self.mount(route);
        self.view = view;
        effects
    }

    pub fn navigate(&mut self, route: &Route) -> Vec<Effect> {
        self.open(&route.to_path())
    }

    /// Submit the header's global search box.
    pub fn header_search(&mut self, text: &str) -> Vec<Effect> {
        match header_search(text) {
            Some(route) => self.navigate(&route),
            None => Vec::new(),
        }
    }

    pub fn handle_response(&mut self, token: RequestToken, outcome: Outcome) -> Vec<Effect> {
        let effects = match &mut self.view {
            View::Home(view) => view.handle_response(token, outcome),
            View::List(view) => view.handle_response(token, outcome),
            View::Detail(view) => view.handle_response(token, outcome),
            View::Form(view) => view.handle_response(token, outcome),
            View::NotFound(_) => Vec::new(),
        };
        self.track(effects)
    }

    /// Answer the mounted view's pending `Confirm`.
    pub fn confirm(&mut self, accepted: bool) -> Vec<Effect> {
        let effects = match &mut self.view {
            View::List(view) => view.confirm(accepted),
            View::Detail(view) => view.confirm(accepted),
            _ => Vec::new(),
        };
        self.track(effects)
    }

    /// Run an operation on the mounted list view, keeping the location in
    /// step with the `UpdateUrl` it emits.
    pub fn with_list(&mut self, op: impl FnOnce(&mut ListView) -> Vec<Effect>) -> Vec<Effect> {
        let effects = match &mut self.view {
            View::List(view) => op(view),
            _ => Vec::new(),
        };
        self.track(effects)
    }

    pub fn with_detail(&mut self, op: impl FnOnce(&mut DetailView) -> Vec<Effect>) -> Vec<Effect> {
        match &mut self.view {
            View::Detail(view) => op(view),
            _ => Vec::new(),
        }
    }

    pub fn with_form(&mut self, op: impl FnOnce(&mut FormView) -> Vec<Effect>) -> Vec<Effect> {
        match &mut self.view {
            View::Form(view) => op(view),
            _ => Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    fn track(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        for effect in &effects {
            if let Effect::UpdateUrl(location) = effect {
                self.location.clone_from(location);
            }
        }
        effects
    }

    fn mount(&self, route: Route) -> (View, Vec<Effect>) {
        let client = self.client.clone();
        let tokens = self.tokens.clone();
        match route {
            Route::Home => {
                let mut view = HomeView::new(client, tokens);
                let effects = view.mount();
                (View::Home(view), effects)
            }
            Route::Movies(query) => {
                let mut view = ListView::new(client, tokens);
                let effects = view.mount(query);
                (View::List(view), effects)
            }
            Route::MovieDetail(id) => {
                let mut view = DetailView::new(client, tokens);
                let effects = view.mount(id);
                (View::Detail(view), effects)
            }
            Route::AddMovie => {
                let mut view = FormView::new(client, tokens, FormMode::Create);
                let effects = view.mount();
                (View::Form(view), effects)
            }
            Route::EditMovie(id) => {
                let mut view = FormView::new(client, tokens, FormMode::Edit(id));
                let effects = view.mount();
                (View::Form(view), effects)
            }
            Route::NotFound(location) => (View::NotFound(location), Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::types::Genre;
    use crate::views::test_support::*;

    fn first_token(effects: &[Effect]) -> RequestToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Request { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn routes_mount_matching_views() {
        let mut app = App::new(client());
        assert!(!app.open("/").is_empty());
        assert!(matches!(app.view(), View::Home(_)));
        app.open("/movie/3");
        assert!(matches!(app.view(), View::Detail(_)));
        assert!(app.open("/movie/add").is_empty());
        assert!(matches!(app.view(), View::Form(_)));
        app.open("/nope");
        assert!(matches!(app.view(), View::NotFound(_)));
    }

    #[test]
    fn header_search_resyncs_mounted_list() {
        let mut app = App::new(client());
        app.open("/movies?genre=Drama&page=2");
        let effects = app.header_search("dune");
        assert_eq!(effects.len(), 1);
        assert_eq!(app.location(), "/movies?search=dune&page=1");
        let View::List(list) = app.view() else {
            panic!("expected list view");
        };
        assert_eq!(list.query().search, "dune");
        assert_eq!(list.query().genre, None);
    }

    #[test]
    fn list_controls_move_the_location() {
        let mut app = App::new(client());
        app.open("/movies");
        app.with_list(|list| list.apply_genre(Some(Genre::Comedy)));
        assert_eq!(app.location(), "/movies?genre=Comedy&page=1");

        // Re-opening the location the list just wrote is a no-op.
        assert!(app.open("/movies?genre=Comedy&page=1").is_empty());
    }

    #[test]
    fn responses_for_an_unmounted_view_are_dropped() {
        let mut app = App::new(client());
        let stale = first_token(&app.open("/movie/1"));
        let fresh = first_token(&app.open("/movie/2"));
        assert_ne!(stale, fresh);

        app.handle_response(stale, Ok(HttpResponse::new(200, movie_json("1", "One"))));
        let View::Detail(detail) = app.view() else {
            panic!("expected detail view");
        };
        assert!(detail.movie().is_none());
    }
}
