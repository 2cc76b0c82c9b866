//! Create / edit form.
//!
//! Create mode starts blank; edit mode loads the record first. Submission is
//! validated locally and sent as POST or PUT. While a submission is in
//! flight further submits are ignored, so one click is one request.

use tracing::{debug, info, warn};

use crate::client::MovieClient;
use crate::effect::{Effect, Outcome, RequestToken, TokenIssuer};
use crate::route::Route;
use crate::types::MovieId;
use crate::validation::{validate, Field, FieldError, FieldErrors, MovieForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(MovieId),
}

#[derive(Debug)]
pub struct FormView {
    client: MovieClient,
    tokens: TokenIssuer,
    mode: FormMode,
    form: MovieForm,
    errors: FieldErrors,
    loading: Option<RequestToken>,
    load_error: Option<String>,
    submitting: Option<RequestToken>,
}

impl FormView {
    pub fn new(client: MovieClient, tokens: TokenIssuer, mode: FormMode) -> Self {
        Self {
            client,
            tokens,
            mode,
            form: MovieForm::default(),
            errors: FieldErrors::new(),
            loading: None,
            load_error: None,
            submitting: None,
        }
    }

    /// Edit mode fetches the record to prefill the fields.
    pub fn mount(&mut self) -> Vec<Effect> {
        let FormMode::Edit(id) = &self.mode else {
            return Vec::new();
        };
        let token = self.tokens.issue();
        let request = self.client.build_get_movie(id);
        self.loading = Some(token);
        self.load_error = None;
        vec![Effect::request(token, request)]
    }

    /// Typing into a field clears that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.remove(&field);
    }

    pub fn submit(&mut self, current_year: i32) -> Vec<Effect> {
        if self.submitting.is_some() || self.loading.is_some() {
            return Vec::new();
        }
        let draft = match validate(&self.form, current_year) {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(fields = errors.len(), "movie form rejected locally");
                self.errors = errors;
                return Vec::new();
            }
        };
        self.errors.clear();

        let request = match &self.mode {
            FormMode::Create => self.client.build_create_movie(&draft),
            FormMode::Edit(id) => self.client.build_update_movie(id, &draft),
        };
        match request {
            Ok(request) => {
                let token = self.tokens.issue();
                self.submitting = Some(token);
                vec![Effect::request(token, request)]
            }
            Err(err) => vec![Effect::Alert(err.to_string())],
        }
    }

    pub fn cancel(&self) -> Vec<Effect> {
        vec![Effect::Navigate(Route::movies())]
    }

    pub fn handle_response(&mut self, token: RequestToken, outcome: Outcome) -> Vec<Effect> {
        if self.loading == Some(token) {
            self.loading = None;
            match outcome.and_then(|response| self.client.parse_get_movie(response)) {
                Ok(movie) => self.form = MovieForm::from(&movie),
                Err(err) => {
                    warn!(mode = ?self.mode, error = %err, "error fetching movie");
                    self.load_error = Some(err.to_string());
                }
            }
            return Vec::new();
        }

        if self.submitting == Some(token) {
            self.submitting = None;
            let saved = match &self.mode {
                FormMode::Create => outcome.and_then(|r| self.client.parse_create_movie(r)),
                FormMode::Edit(_) => outcome.and_then(|r| self.client.parse_update_movie(r)),
            };
            return match saved {
                Ok(movie) => {
                    let notice = if self.is_edit() {
                        "Movie updated successfully!"
                    } else {
                        "Movie created successfully!"
                    };
                    info!(id = %movie.id, title = %movie.title, "movie saved");
                    vec![
                        Effect::Notice(notice.to_string()),
                        Effect::Navigate(Route::movies()),
                    ]
                }
                Err(err) => {
                    warn!(error = %err, "error saving movie");
                    let text = err.alert_message(
                        "Something went wrong",
                        "Error saving movie. Please try again.",
                    );
                    vec![Effect::Alert(text)]
                }
            };
        }

        debug!(%token, "discarding stale form response");
        Vec::new()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn form(&self) -> &MovieForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() {
            "Edit Movie"
        } else {
            "Add New Movie"
        }
    }
}
