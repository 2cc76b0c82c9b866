mod cli;
mod render;
mod runtime;
mod transport;

use std::io;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use movies_core::views::DetailState;
use movies_core::{App, ClientConfig, ListQuery, MovieClient, MovieId, Route, View};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, MovieFields};
use crate::runtime::{AutoAnswer, Message, Prompt, Runtime, StdinPrompt};
use crate::transport::UreqTransport;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("invalid MOVIES_* environment")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    info!(api_url = %config.api_url, "using movie API");

    let app = App::new(MovieClient::from_config(&config));
    let prompt: Box<dyn Prompt> = if cli.yes {
        Box::new(AutoAnswer(true))
    } else {
        Box::new(StdinPrompt)
    };
    let mut runtime = Runtime::new(app, UreqTransport::new(), prompt);

    let mut messages = Vec::new();
    match cli.command {
        Commands::Home => messages.extend(runtime.dispatch(|app| app.open("/"))),
        Commands::List {
            search,
            genre,
            page,
        } => {
            let query = ListQuery {
                search: search.unwrap_or_default(),
                genre,
                page: page.max(1),
            };
            let location = query.to_location();
            messages.extend(runtime.dispatch(|app| app.open(&location)));
        }
        Commands::Search { text } => {
            if text.trim().is_empty() {
                bail!("nothing to search for");
            }
            messages.extend(runtime.dispatch(|app| app.header_search(&text)));
        }
        Commands::Open { location } => {
            messages.extend(runtime.dispatch(|app| app.open(&location)));
        }
        Commands::Show { id } => {
            let route = Route::MovieDetail(MovieId::new(id));
            messages.extend(runtime.dispatch(|app| app.navigate(&route)));
        }
        Commands::Add { fields } => {
            messages.extend(runtime.dispatch(|app| app.navigate(&Route::AddMovie)));
            messages.extend(submit_form(&mut runtime, &fields));
        }
        Commands::Edit { id, fields } => {
            let route = Route::EditMovie(MovieId::new(id));
            messages.extend(runtime.dispatch(|app| app.navigate(&route)));
            if let View::Form(form) = runtime.app().view() {
                if let Some(error) = form.load_error() {
                    bail!("could not load movie: {error}");
                }
            }
            messages.extend(submit_form(&mut runtime, &fields));
        }
        Commands::Delete { id } => {
            let route = Route::MovieDetail(MovieId::new(id));
            messages.extend(runtime.dispatch(|app| app.navigate(&route)));
            ensure_deletable(runtime.app().view())?;
            messages.extend(runtime.dispatch(|app| app.with_detail(|detail| detail.request_delete())));
        }
    }

    let mut failed = false;
    for message in &messages {
        match message {
            Message::Alert(text) => {
                failed = true;
                eprintln!("error: {text}");
            }
            Message::Notice(text) => eprintln!("{text}"),
        }
    }

    let view = runtime.app().view();
    render::render(view, &mut io::stdout().lock()).context("failed to write output")?;

    match view {
        View::Form(form) if !form.errors().is_empty() => bail!("the movie was not saved"),
        View::List(list) if list.fetch_error().is_some() => bail!("the movie list did not load"),
        _ => {}
    }
    if failed {
        bail!("the last action failed");
    }
    Ok(())
}

/// Delete only proceeds from a detail view showing the movie.
fn ensure_deletable(view: &View) -> Result<()> {
    let View::Detail(detail) = view else {
        bail!("no movie to delete");
    };
    match detail.state() {
        DetailState::Loaded(_) => Ok(()),
        DetailState::NotFound => bail!("movie not found; nothing was deleted"),
        DetailState::Failed(error) => bail!("could not load movie: {error}"),
        DetailState::Loading => bail!("movie did not load; nothing was deleted"),
    }
}

/// Fill the mounted form with the given fields and submit it.
fn submit_form<T, P>(runtime: &mut Runtime<T, P>, fields: &MovieFields) -> Vec<Message>
where
    T: transport::Transport,
    P: Prompt,
{
    let year = chrono::Local::now().year();
    runtime.dispatch(|app| {
        app.with_form(|form| {
            for (field, value) in fields.provided() {
                form.set_field(field, value);
            }
            form.submit(year)
        })
    })
}
