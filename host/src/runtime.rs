//! Drives an `App` by carrying out the effects its views emit.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use movies_core::{App, Effect};
use tracing::{debug, info};

use crate::transport::Transport;

/// Answers `Confirm` effects.
pub trait Prompt {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Fixed answer, for `--yes` and tests.
pub struct AutoAnswer(pub bool);

impl Prompt for AutoAnswer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Asks on stderr and reads a y/N answer from stdin.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Alert(String),
    Notice(String),
}

pub struct Runtime<T, P> {
    app: App,
    transport: T,
    prompt: P,
}

impl<T: Transport, P: Prompt> Runtime<T, P> {
    pub fn new(app: App, transport: T, prompt: P) -> Self {
        Self {
            app,
            transport,
            prompt,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Apply `op` to the app and settle everything it triggers.
    pub fn dispatch(&mut self, op: impl FnOnce(&mut App) -> Vec<Effect>) -> Vec<Message> {
        let effects = op(&mut self.app);
        self.settle(effects)
    }

    /// Run effects until none are left. Requests run one at a time, in the
    /// order they were emitted.
    pub fn settle(&mut self, effects: Vec<Effect>) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Request { token, request } => {
                    let outcome = self.transport.execute(request);
                    queue.extend(self.app.handle_response(token, outcome));
                }
                Effect::Confirm { prompt } => {
                    let accepted = self.prompt.confirm(&prompt);
                    debug!(accepted, "confirmation answered");
                    queue.extend(self.app.confirm(accepted));
                }
                Effect::Navigate(route) => {
                    info!(to = %route.to_path(), "navigating");
                    queue.extend(self.app.navigate(&route));
                }
                Effect::UpdateUrl(location) => debug!(%location, "location updated"),
                Effect::Alert(text) => messages.push(Message::Alert(text)),
                Effect::Notice(text) => messages.push(Message::Notice(text)),
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use movies_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, MovieClient, Outcome, View};

    use super::*;

    const MOVIE: &str = r#"{"id":"7","title":"Heat","description":"Heist","genre":"Thriller","release_year":1995,"rating":8.3,"director":"Michael Mann"}"#;

    fn app() -> App {
        App::new(MovieClient::new("http://movies.test"))
    }

    #[test]
    fn settles_list_fetch() {
        let transport = |request: HttpRequest| -> Outcome {
            assert_eq!(request.url, "http://movies.test/api/movies?page=1&per_page=12");
            Ok(HttpResponse::new(200, format!(r#"{{"data":[{MOVIE}],"total":1}}"#)))
        };
        let mut runtime = Runtime::new(app(), transport, AutoAnswer(true));
        let messages = runtime.dispatch(|app| app.open("/movies"));
        assert!(messages.is_empty());
        let View::List(list) = runtime.app().view() else {
            panic!("expected list view");
        };
        assert_eq!(list.movies()[0].title, "Heat");
    }

    #[test]
    fn declined_delete_sends_no_request() {
        let sent = RefCell::new(Vec::new());
        let transport = |request: HttpRequest| -> Outcome {
            sent.borrow_mut().push(request.method);
            Ok(HttpResponse::new(200, MOVIE))
        };
        let mut runtime = Runtime::new(app(), &transport, AutoAnswer(false));
        runtime.dispatch(|app| app.open("/movie/7"));
        runtime.dispatch(|app| app.with_detail(|detail| detail.request_delete()));
        assert_eq!(*sent.borrow(), vec![HttpMethod::Get]);
    }

    #[test]
    fn confirmed_delete_navigates_to_list() {
        let transport = |request: HttpRequest| -> Outcome {
            match request.method {
                HttpMethod::Get if request.url.ends_with("/7") => Ok(HttpResponse::new(200, MOVIE)),
                HttpMethod::Get => Ok(HttpResponse::new(200, r#"{"data":[],"total":0}"#)),
                HttpMethod::Delete => Ok(HttpResponse::new(200, r#"{"message":"deleted"}"#)),
                _ => Err(ApiError::Transport("unexpected".into())),
            }
        };
        let mut runtime = Runtime::new(app(), transport, AutoAnswer(true));
        runtime.dispatch(|app| app.open("/movie/7"));
        let messages = runtime.dispatch(|app| app.with_detail(|detail| detail.request_delete()));
        assert_eq!(
            messages,
            vec![Message::Notice("Movie deleted successfully!".to_string())]
        );
        assert!(matches!(runtime.app().view(), View::List(_)));
        assert_eq!(runtime.app().location(), "/movies?page=1");
    }

    #[test]
    fn failed_delete_reports_alert() {
        let transport = |request: HttpRequest| -> Outcome {
            match request.method {
                HttpMethod::Delete => Err(ApiError::Transport("connection reset".into())),
                _ => Ok(HttpResponse::new(200, MOVIE)),
            }
        };
        let mut runtime = Runtime::new(app(), transport, AutoAnswer(true));
        runtime.dispatch(|app| app.open("/movie/7"));
        let messages = runtime.dispatch(|app| app.with_detail(|detail| detail.request_delete()));
        assert_eq!(
            messages,
            vec![Message::Alert("Error deleting movie. Please try again.".to_string())]
        );
        assert!(matches!(runtime.app().view(), View::Detail(_)));
    }
}
