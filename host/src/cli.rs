//! CLI command definitions using clap.

use clap::{Args, Parser, Subcommand};
use movies_core::{Field, Genre};

/// Browse and curate the movie catalog from a terminal.
#[derive(Parser, Debug)]
#[command(name = "movies")]
#[command(version)]
pub struct Cli {
    /// Base URL of the movie API (overrides MOVIES_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true, default_value_t = false)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Landing page with featured movies
    Home,

    /// List movies, optionally filtered
    List {
        /// Free-text search over title, description, genre, and director
        #[arg(short, long)]
        search: Option<String>,

        /// Genre filter
        #[arg(short, long)]
        genre: Option<Genre>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Header search: jump to the first page of matches
    Search {
        text: String,
    },

    /// Open any location, e.g. "/movies?search=dune&page=2"
    Open {
        location: String,
    },

    /// Show one movie
    Show {
        id: String,
    },

    /// Create a movie
    Add {
        #[command(flatten)]
        fields: MovieFields,
    },

    /// Edit a movie; omitted fields keep their current value
    Edit {
        id: String,

        #[command(flatten)]
        fields: MovieFields,
    },

    /// Delete a movie after confirmation
    Delete {
        id: String,
    },
}

/// Form fields as flags. Values are passed to the form untouched so the
/// form's own validation reports problems.
#[derive(Args, Debug, Default)]
pub struct MovieFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long = "year")]
    pub release_year: Option<String>,

    #[arg(long)]
    pub rating: Option<String>,

    #[arg(long)]
    pub director: Option<String>,

    #[arg(long)]
    pub poster_url: Option<String>,
}

impl MovieFields {
    /// The fields that were given, in form order.
    pub fn provided(&self) -> Vec<(Field, &str)> {
        [
            (Field::Title, &self.title),
            (Field::Description, &self.description),
            (Field::Genre, &self.genre),
            (Field::ReleaseYear, &self.release_year),
            (Field::Rating, &self.rating),
            (Field::Director, &self.director),
            (Field::PosterUrl, &self.poster_url),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::parse_from(["movies", "list", "--search", "dune", "--genre", "Sci-Fi", "-p", "2"]);
        let Commands::List { search, genre, page } = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(search.as_deref(), Some("dune"));
        assert_eq!(genre, Some(Genre::SciFi));
        assert_eq!(page, 2);
    }

    #[test]
    fn rejects_unknown_genre() {
        assert!(Cli::try_parse_from(["movies", "list", "--genre", "Western"]).is_err());
    }

    #[test]
    fn collects_provided_fields_only() {
        let cli = Cli::parse_from(["movies", "edit", "7", "--rating", "9.1", "--year", "1995"]);
        let Commands::Edit { id, fields } = &cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(
            fields.provided(),
            vec![(Field::ReleaseYear, "1995"), (Field::Rating, "9.1")]
        );
        assert_eq!(id, "7");
    }
}
