//! Stateless HTTP request builder and response parser for the movie API.
//!
//! # Design
//! `MovieClient` holds only the injected base URL and carries no mutable
//! state between calls. Each REST operation is split into a `build_*` method
//! producing an `HttpRequest` and a `parse_*` method consuming the matching
//! `HttpResponse`. The host executes the round-trip in between.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{encode_pairs, ListQuery};
use crate::types::{Movie, MovieDraft, MovieId, MoviePage};

/// Page size the landing page asks for.
pub const FEATURED_COUNT: u32 = 6;

#[derive(Debug, Clone)]
pub struct MovieClient {
    base_url: String,
}

impl MovieClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn movies_url(&self) -> String {
        format!("{}/api/movies", self.base_url)
    }

    fn movie_url(&self, id: &MovieId) -> String {
        format!(
            "{}/api/movies/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    /// `GET /api/movies?page=..&per_page=12[&search=..][&genre=..]`
    pub fn build_list_movies(&self, query: &ListQuery) -> HttpRequest {
        get(format!(
            "{}?{}",
            self.movies_url(),
            encode_pairs(&query.fetch_params())
        ))
    }

    /// `GET /api/movies?per_page=6`, the landing page's featured strip.
    pub fn build_featured_movies(&self) -> HttpRequest {
        get(format!("{}?per_page={FEATURED_COUNT}", self.movies_url()))
    }

    pub fn build_get_movie(&self, id: &MovieId) -> HttpRequest {
        get(self.movie_url(id))
    }

    pub fn build_create_movie(&self, draft: &MovieDraft) -> Result<HttpRequest> {
        json_request(HttpMethod::Post, self.movies_url(), draft)
    }

    pub fn build_update_movie(&self, id: &MovieId, draft: &MovieDraft) -> Result<HttpRequest> {
        json_request(HttpMethod::Put, self.movie_url(id), draft)
    }

    pub fn build_delete_movie(&self, id: &MovieId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.movie_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_movies(&self, response: HttpResponse) -> Result<MoviePage> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_movie(&self, response: HttpResponse) -> Result<Movie> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_movie(&self, response: HttpResponse) -> Result<Movie> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_movie(&self, response: HttpResponse) -> Result<Movie> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Any 2xx counts; the body (if any) is ignored.
    pub fn parse_delete_movie(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request(method: HttpMethod, url: String, draft: &MovieDraft) -> Result<HttpRequest> {
    let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::from_response(response))
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
