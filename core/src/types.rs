//! Domain DTOs for the movie API.
//!
//! # Design
//! These mirror the backend's JSON schema but are defined independently of
//! the mock server; the integration tests catch drift between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque server-assigned identifier.
///
/// Backends disagree on whether ids are integers or strings, so both are
/// accepted on the way in. It is always rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => MovieId(text),
            Raw::Number(n) => MovieId(n.to_string()),
        })
    }
}

/// A movie record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub release_year: i32,
    pub rating: f64,
    pub director: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Movie {
    pub fn draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            genre: self.genre.clone(),
            release_year: self.release_year,
            rating: self.rating,
            director: self.director.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}

/// Request body for POST and PUT: a movie without its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub release_year: i32,
    pub rating: f64,
    pub director: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// One page of the movie listing. Both fields are required; a body without
/// them is a malformed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub data: Vec<Movie>,
    pub total: u64,
}

/// The fixed genre vocabulary offered by the filter bar and the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Romance,
    Thriller,
    Documentary,
    Animation,
    Adventure,
}

impl Genre {
    /// Genres selectable in the movie form.
    pub const ALL: [Genre; 10] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Documentary,
        Genre::Animation,
        Genre::Adventure,
    ];

    /// Genres offered as list filters.
    pub const FILTERS: [Genre; 8] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Documentary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Documentary => "Documentary",
            Genre::Animation => "Animation",
            Genre::Adventure => "Adventure",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_id_accepts_integers_and_strings() {
        let numeric: MovieId = serde_json::from_str("42").unwrap();
        let textual: MovieId = serde_json::from_str(r#""abc-1""#).unwrap();
        assert_eq!(numeric.as_str(), "42");
        assert_eq!(textual.to_string(), "abc-1");
        assert_eq!(serde_json::to_string(&numeric).unwrap(), r#""42""#);
    }

    #[test]
    fn movie_without_poster_deserializes() {
        let movie: Movie = serde_json::from_str(
            r#"{"id":7,"title":"Alien","description":"In space","genre":"Horror",
                "release_year":1979,"rating":8.5,"director":"Ridley Scott"}"#,
        )
        .unwrap();
        assert_eq!(movie.id, MovieId::new("7"));
        assert!(movie.poster_url.is_none());
    }

    #[test]
    fn draft_omits_missing_poster() {
        let draft = MovieDraft {
            title: "Heat".into(),
            description: "Crime".into(),
            genre: "Thriller".into(),
            release_year: 1995,
            rating: 8.3,
            director: "Michael Mann".into(),
            poster_url: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("poster_url").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["release_year"], 1995);
    }

    #[test]
    fn page_requires_data_and_total() {
        assert!(serde_json::from_str::<MoviePage>(r#"{"data":[]}"#).is_err());
        assert!(serde_json::from_str::<MoviePage>(r#"{"total":3}"#).is_err());
        let page: MoviePage = serde_json::from_str(r#"{"data":[],"total":0}"#).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn genre_wire_names() {
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), r#""Sci-Fi""#);
        assert!("sci-fi".parse::<Genre>().is_err());
        assert!(Genre::FILTERS.iter().all(|g| Genre::ALL.contains(g)));
    }
}
