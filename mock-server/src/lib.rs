use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_PER_PAGE: usize = 12;
const MAX_PER_PAGE: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub release_year: i32,
    pub rating: f64,
    pub director: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub release_year: i32,
    pub rating: f64,
    pub director: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl MovieInput {
    fn into_movie(self, id: Uuid) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            genre: self.genre,
            release_year: self.release_year,
            rating: self.rating,
            director: self.director,
            poster_url: self.poster_url.filter(|url| !url.trim().is_empty()),
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        let required = [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Genre", &self.genre),
            ("Director", &self.director),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ApiError::bad_request(format!("{name} is required")));
        }
        if self.release_year < 1900 {
            return Err(ApiError::bad_request("Release year must be 1900 or later"));
        }
        if !(0.0..=10.0).contains(&self.rating) {
            return Err(ApiError::bad_request("Rating must be between 0 and 10"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub search: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoviePage {
    pub data: Vec<Movie>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Error body shaped like the real backend's: `{"message": ...}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Movie not found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message { message: self.message })).into_response()
    }
}

/// Insertion-ordered store; listing order is creation order.
pub type Db = Arc<RwLock<Vec<Movie>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a pre-seeded catalog.
pub fn app_with(movies: Vec<Movie>) -> Router {
    let db: Db = Arc::new(RwLock::new(movies));
    Router::new()
        .route("/api/movies", get(list_movies).post(create_movie))
        .route(
            "/api/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, movies: Vec<Movie>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(movies)).await
}

/// Case-insensitive match over title, description, genre, and director.
fn matches_search(movie: &Movie, needle: &str) -> bool {
    [&movie.title, &movie.description, &movie.genre, &movie.director]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

async fn list_movies(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<MoviePage> {
    let movies = db.read().await;
    let needle = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let genre = params.genre.as_deref().filter(|g| !g.is_empty());

    let matching: Vec<&Movie> = movies
        .iter()
        .filter(|movie| needle.as_deref().is_none_or(|n| matches_search(movie, n)))
        .filter(|movie| genre.is_none_or(|g| movie.genre == g))
        .collect();

    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let page = params.page.unwrap_or(1).max(1);
    let data = matching
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(|movie| (*movie).clone())
        .collect();

    Json(MoviePage {
        data,
        total: matching.len(),
    })
}

async fn create_movie(
    State(db): State<Db>,
    Json(input): Json<MovieInput>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    input.check()?;
    let movie = input.into_movie(Uuid::new_v4());
    db.write().await.push(movie.clone());
    tracing::info!(id = %movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Ids that are not UUIDs cannot name a stored movie.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found())
}

async fn get_movie(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Movie>, ApiError> {
    let id = parse_id(&id)?;
    let movies = db.read().await;
    movies
        .iter()
        .find(|movie| movie.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<MovieInput>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id(&id)?;
    input.check()?;
    let mut movies = db.write().await;
    let slot = movies
        .iter_mut()
        .find(|movie| movie.id == id)
        .ok_or_else(ApiError::not_found)?;
    *slot = input.into_movie(id);
    Ok(Json(slot.clone()))
}

async fn delete_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id)?;
    let mut movies = db.write().await;
    let index = movies
        .iter()
        .position(|movie| movie.id == id)
        .ok_or_else(ApiError::not_found)?;
    movies.remove(index);
    tracing::info!(%id, "movie deleted");
    Ok(Json(Message {
        message: "Movie deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MovieInput {
        serde_json::from_str(
            r#"{"title":"Alien","description":"In space","genre":"Horror",
                "release_year":1979,"rating":8.5,"director":"Ridley Scott"}"#,
        )
        .unwrap()
    }

    #[test]
    fn movie_serializes_without_missing_poster() {
        let movie = input().into_movie(Uuid::nil());
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["release_year"], 1979);
        assert!(json.get("poster_url").is_none());
    }

    #[test]
    fn blank_poster_is_dropped() {
        let mut input = input();
        input.poster_url = Some("  ".to_string());
        assert!(input.into_movie(Uuid::nil()).poster_url.is_none());
    }

    #[test]
    fn check_rejects_blank_and_out_of_range() {
        assert!(input().check().is_ok());

        let mut blank = input();
        blank.director = " ".to_string();
        assert_eq!(blank.check().err().unwrap().message, "Director is required");

        let mut rating = input();
        rating.rating = 10.5;
        assert!(rating.check().is_err());

        let mut year = input();
        year.release_year = 1899;
        assert!(year.check().is_err());
    }

    #[test]
    fn input_requires_all_fields() {
        let result: Result<MovieInput, _> = serde_json::from_str(r#"{"title":"Only"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn search_covers_all_text_fields() {
        let movie = input().into_movie(Uuid::nil());
        assert!(matches_search(&movie, "alien"));
        assert!(matches_search(&movie, "ridley"));
        assert!(matches_search(&movie, "horror"));
        assert!(!matches_search(&movie, "comedy"));
    }
}
