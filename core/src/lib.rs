//! Client core for the movie catalog.
//!
//! # Overview
//! Everything a movie-catalog front end needs except the I/O: typed DTOs,
//! a request builder / response parser for the `/api/movies` REST contract,
//! the list query and its shareable URL form, local form validation, and the
//! home, list, detail, and form views as state machines that emit `Effect`s.
//!
//! # Design
//! - `MovieClient` is stateless; it holds only the injected base URL.
//! - Each REST operation is split into `build_*` and `parse_*` so the I/O
//!   boundary is explicit and the host decides how to execute requests.
//! - Views tag requests with `RequestToken`s and only apply the response to
//!   the latest one, so a slow early answer cannot overwrite a later one.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod app;
pub mod client;
pub mod config;
pub mod effect;
pub mod error;
pub mod http;
pub mod query;
pub mod route;
pub mod types;
pub mod validation;
pub mod views;

pub use app::{App, View};
pub use client::MovieClient;
pub use config::ClientConfig;
pub use effect::{Effect, Outcome, RequestToken, TokenIssuer};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{ListQuery, PAGE_SIZE};
pub use route::Route;
pub use types::{Genre, Movie, MovieDraft, MovieId, MoviePage};
pub use validation::{Field, FieldError, FieldErrors, MovieForm};
