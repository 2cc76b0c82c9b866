//! Route table mapping location paths to views.

use crate::query::ListQuery;
use crate::types::MovieId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Movies(ListQuery),
    AddMovie,
    EditMovie(MovieId),
    MovieDetail(MovieId),
    NotFound(String),
}

impl Route {
    /// Resolve a location (`path[?query]`).
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["movies"] => Route::Movies(ListQuery::from_query_string(query)),
            ["movie", "add"] => Route::AddMovie,
            ["movie", "edit", id] => Route::EditMovie(decode_id(id)),
            ["movie", id] => Route::MovieDetail(decode_id(id)),
            _ => Route::NotFound(location.to_string()),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Movies(query) => query.to_location(),
            Route::AddMovie => "/movie/add".to_string(),
            Route::EditMovie(id) => format!("/movie/edit/{}", urlencoding::encode(id.as_str())),
            Route::MovieDetail(id) => format!("/movie/{}", urlencoding::encode(id.as_str())),
            Route::NotFound(location) => location.clone(),
        }
    }

    /// The list route with no filters.
    pub fn movies() -> Self {
        Route::Movies(ListQuery::default())
    }
}

/// The header's global search box: blank input goes nowhere.
pub fn header_search(text: &str) -> Option<Route> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(Route::Movies(ListQuery::with_search(text)))
    }
}

fn decode_id(raw: &str) -> MovieId {
    let decoded = urlencoding::decode(raw).map(|id| id.into_owned());
    MovieId::new(decoded.unwrap_or_else(|_| raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Genre;

    #[test]
    fn resolves_every_view() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/movies"), Route::movies());
        assert_eq!(Route::parse("/movie/add"), Route::AddMovie);
        assert_eq!(Route::parse("/movie/edit/7"), Route::EditMovie(MovieId::new("7")));
        assert_eq!(Route::parse("/movie/7"), Route::MovieDetail(MovieId::new("7")));
        assert_eq!(
            Route::parse("/settings"),
            Route::NotFound("/settings".to_string())
        );
    }

    #[test]
    fn add_is_not_an_id() {
        assert!(matches!(Route::parse("/movie/add/"), Route::AddMovie));
    }

    #[test]
    fn list_route_keeps_query() {
        let route = Route::parse("/movies?search=dune&genre=Drama&page=2");
        let Route::Movies(query) = &route else {
            panic!("expected list route, got {route:?}");
        };
        assert_eq!(query.search, "dune");
        assert_eq!(query.genre, Some(Genre::Drama));
        assert_eq!(query.page, 2);
        assert_eq!(Route::parse(&route.to_path()), route);
    }

    #[test]
    fn header_search_navigates_to_first_page() {
        assert_eq!(header_search("   "), None);
        let route = header_search("  alien ").unwrap();
        assert_eq!(route.to_path(), "/movies?search=alien&page=1");
    }
}
