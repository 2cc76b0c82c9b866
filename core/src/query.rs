//! The list query state and its shareable-URL form.
//!
//! `ListQuery` is the single value that decides which page of movies is
//! fetched. It is mirrored into the location's query string and re-derived
//! from it, so `from_query_string(q.to_query_string()) == q` for any query
//! the view can produce.

use std::borrow::Cow;

use crate::types::Genre;

/// Fixed listing page size.
pub const PAGE_SIZE: u32 = 12;

/// Number of pages needed to show `total` movies.
pub fn total_pages(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Trimmed free text; empty means no search filter.
    pub search: String,
    pub genre: Option<Genre>,
    /// 1-based.
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: None,
            page: 1,
        }
    }
}

impl ListQuery {
    pub fn with_search(search: &str) -> Self {
        Self {
            search: search.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.genre.is_some()
    }

    /// Derive a query from a location query string (with or without the
    /// leading `?`). Unknown keys are ignored, an unknown genre means no genre
    /// filter, and a missing or non-positive page falls back to 1.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in parse_pairs(raw.trim_start_matches('?')) {
            match &*key {
                "search" => query.search = value.trim().to_string(),
                "genre" => query.genre = value.parse().ok(),
                "page" => {
                    query.page = value.trim().parse().ok().filter(|page| *page >= 1).unwrap_or(1);
                }
                _ => {}
            }
        }
        query
    }

    /// Canonical query string: `search` and `genre` only when set, `page`
    /// always.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(3);
        if !self.search.is_empty() {
            pairs.push(("search", Cow::Borrowed(self.search.as_str())));
        }
        if let Some(genre) = self.genre {
            pairs.push(("genre", Cow::Borrowed(genre.as_str())));
        }
        pairs.push(("page", Cow::Owned(self.page.to_string())));
        encode_pairs(&pairs)
    }

    /// Path plus query string for the list route.
    pub fn to_location(&self) -> String {
        format!("/movies?{}", self.to_query_string())
    }

    /// Parameters of the listing request this query produces.
    pub fn fetch_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(genre) = self.genre {
            params.push(("genre", genre.as_str().to_string()));
        }
        params
    }
}

pub(crate) fn encode_pairs<V: AsRef<str>>(pairs: &[(&str, V)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_pairs(raw: &str) -> impl Iterator<Item = (Cow<'_, str>, String)> {
    raw.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode_component(key), decode_component(value).into_owned())
    })
}

/// Form-style decoding: `+` is a space, malformed escapes are kept verbatim.
fn decode_component(raw: &str) -> Cow<'_, str> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(12), 1);
        assert_eq!(total_pages(13), 2);
        assert_eq!(total_pages(25), 3);
    }

    #[test]
    fn default_query_string_is_page_only() {
        assert_eq!(ListQuery::default().to_query_string(), "page=1");
    }

    #[test]
    fn query_string_is_canonical_and_encoded() {
        let query = ListQuery {
            search: "star wars & co".into(),
            genre: Some(Genre::SciFi),
            page: 2,
        };
        assert_eq!(
            query.to_query_string(),
            "search=star%20wars%20%26%20co&genre=Sci-Fi&page=2"
        );
        assert_eq!(ListQuery::from_query_string(&query.to_query_string()), query);
    }

    #[test]
    fn parses_browser_style_query() {
        let query = ListQuery::from_query_string("?search=the+matrix&genre=Action&page=3&utm=x");
        assert_eq!(query.search, "the matrix");
        assert_eq!(query.genre, Some(Genre::Action));
        assert_eq!(query.page, 3);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        assert_eq!(ListQuery::from_query_string("page=0"), ListQuery::default());
        assert_eq!(ListQuery::from_query_string("page=-4"), ListQuery::default());
        assert_eq!(ListQuery::from_query_string("page=abc"), ListQuery::default());
        assert_eq!(ListQuery::from_query_string("genre=Western"), ListQuery::default());
        assert_eq!(ListQuery::from_query_string("search=&genre="), ListQuery::default());
        assert_eq!(ListQuery::from_query_string(""), ListQuery::default());
    }

    #[test]
    fn fetch_params_omit_empty_filters() {
        let params = ListQuery::default().fetch_params();
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("per_page", "12".to_string())]
        );

        let query = ListQuery {
            search: "dune".into(),
            genre: Some(Genre::Drama),
            page: 4,
        };
        let keys: Vec<_> = query.fetch_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["page", "per_page", "search", "genre"]);
    }
}
