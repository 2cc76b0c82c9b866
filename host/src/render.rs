//! Plain-text rendering of the mounted view.

use std::io::{self, Write};

use movies_core::views::{DetailState, DetailView, FormView, HomeView, ListView};
use movies_core::{Movie, View};

pub fn render(view: &View, out: &mut impl Write) -> io::Result<()> {
    match view {
        View::Home(home) => render_home(home, out),
        View::List(list) => render_list(list, out),
        View::Detail(detail) => render_detail(detail, out),
        View::Form(form) => render_form(form, out),
        View::NotFound(location) => writeln!(out, "Page not found: {location}"),
    }
}

fn render_home(home: &HomeView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Featured Movies")?;
    if home.is_loading() {
        return writeln!(out, "Loading featured movies...");
    }
    for movie in home.featured() {
        writeln!(out, "  {}", summary(movie))?;
    }
    Ok(())
}

fn render_list(list: &ListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "All Movies")?;
    let query = list.query();
    if list.has_active_filters() {
        let mut tags = Vec::new();
        if !query.search.is_empty() {
            tags.push(format!("\"{}\"", query.search));
        }
        if let Some(genre) = query.genre {
            tags.push(genre.to_string());
        }
        writeln!(out, "Showing results for: {}", tags.join(" "))?;
    }

    if list.is_loading() {
        return writeln!(out, "Loading movies...");
    }
    if let Some(error) = list.fetch_error() {
        writeln!(out, "Could not load movies: {error}")?;
    }
    if list.is_empty_state() {
        writeln!(out, "No movies found")?;
        return writeln!(out, "Try adjusting your search criteria or filters.");
    }

    for movie in list.movies() {
        writeln!(out, "  [{}] {}", movie.id, summary(movie))?;
    }

    let pagination = list.pagination();
    if pagination.is_visible() {
        writeln!(
            out,
            "Page {} of {}{}{}",
            pagination.current,
            pagination.total_pages,
            if pagination.has_previous() { "  < Previous" } else { "" },
            if pagination.has_next() { "  Next >" } else { "" },
        )?;
    }
    Ok(())
}

fn render_detail(detail: &DetailView, out: &mut impl Write) -> io::Result<()> {
    match detail.state() {
        DetailState::Loading => writeln!(out, "Loading movie details..."),
        DetailState::NotFound => {
            writeln!(out, "Movie not found")?;
            writeln!(out, "The movie you're looking for doesn't exist.")
        }
        DetailState::Failed(message) => writeln!(out, "Error: {message}"),
        DetailState::Loaded(movie) => {
            writeln!(out, "{} ({})", movie.title, movie.release_year)?;
            writeln!(out, "Genre:    {}", movie.genre)?;
            writeln!(out, "Rating:   {}/10", movie.rating)?;
            writeln!(out, "Director: {}", movie.director)?;
            if let Some(poster) = &movie.poster_url {
                writeln!(out, "Poster:   {poster}")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", movie.description)
        }
    }
}

fn render_form(form: &FormView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", form.heading())?;
    if let Some(error) = form.load_error() {
        writeln!(out, "Could not load movie: {error}")?;
    }
    for (field, error) in form.errors() {
        writeln!(out, "  {field}: {error}")?;
    }
    Ok(())
}

fn summary(movie: &Movie) -> String {
    format!(
        "{} ({}) {} \u{2605} {} - {}",
        movie.title, movie.release_year, movie.genre, movie.rating, movie.director
    )
}
