//! What a view asks its host to do.
//!
//! Views never perform I/O. Every operation returns a list of `Effect`s; the
//! host carries them out and feeds outcomes back (`handle_response`,
//! `confirm`). HTTP effects are tagged with a `RequestToken` so a view can
//! tell a stale response from the one it is waiting for.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::route::Route;

/// Outcome of executing a `Request` effect.
pub type Outcome = Result<HttpResponse, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing tokens.
///
/// Clones share one counter, so views opened from the same `App` never reuse
/// a token that an earlier view may still get an answer for.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer {
    last: Arc<AtomicU64>,
}

impl TokenIssuer {
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Execute `request` and pass the outcome back with `token`.
    Request {
        token: RequestToken,
        request: HttpRequest,
    },
    /// Mirror the list query into the location bar (path plus query).
    UpdateUrl(String),
    Navigate(Route),
    /// Ask the user a yes/no question; answer with the view's `confirm`.
    Confirm { prompt: String },
    /// Blocking error message.
    Alert(String),
    /// Success message.
    Notice(String),
}

impl Effect {
    pub fn request(token: RequestToken, request: HttpRequest) -> Self {
        Effect::Request { token, request }
    }
}

pub(crate) const DELETE_PROMPT: &str =
    "Are you sure you want to delete this movie? This action cannot be undone.";
pub(crate) const DELETE_REJECTED: &str = "Failed to delete movie";
pub(crate) const DELETE_UNREACHABLE: &str = "Error deleting movie. Please try again.";
