//! Local checks run on the movie form before anything goes over the wire.
//!
//! `validate` either produces a typed `MovieDraft` or one error per failing
//! field. Both year and rating bounds are inclusive.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::types::{Movie, MovieDraft};

pub const MIN_RELEASE_YEAR: i32 = 1900;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    Genre,
    ReleaseYear,
    Rating,
    Director,
    PosterUrl,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Genre => "genre",
            Field::ReleaseYear => "release_year",
            Field::Rating => "rating",
            Field::Director => "director",
            Field::PosterUrl => "poster_url",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Genre => "Genre",
            Field::ReleaseYear => "Release year",
            Field::Rating => "Rating",
            Field::Director => "Director",
            Field::PosterUrl => "Poster URL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),

    #[error("{} must be a number", .0.label())]
    NotANumber(Field),

    #[error("Release year must be between 1900 and next year")]
    ReleaseYearOutOfRange,

    #[error("Rating must be between 0 and 10")]
    RatingOutOfRange,
}

pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Raw form input, one string per control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub release_year: String,
    pub rating: String,
    pub director: String,
    pub poster_url: String,
}

impl MovieForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Genre => &self.genre,
            Field::ReleaseYear => &self.release_year,
            Field::Rating => &self.rating,
            Field::Director => &self.director,
            Field::PosterUrl => &self.poster_url,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Genre => &mut self.genre,
            Field::ReleaseYear => &mut self.release_year,
            Field::Rating => &mut self.rating,
            Field::Director => &mut self.director,
            Field::PosterUrl => &mut self.poster_url,
        };
        *slot = value.into();
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            genre: movie.genre.clone(),
            release_year: movie.release_year.to_string(),
            rating: movie.rating.to_string(),
            director: movie.director.clone(),
            poster_url: movie.poster_url.clone().unwrap_or_default(),
        }
    }
}

/// Check `form` against the field rules; `current_year` bounds the release
/// year from above (`current_year + 1` is still accepted).
pub fn validate(form: &MovieForm, current_year: i32) -> Result<MovieDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut text = |field: Field| -> String {
        let value = form.get(field).trim();
        if value.is_empty() {
            errors.insert(field, FieldError::Required(field));
        }
        value.to_string()
    };
    let title = text(Field::Title);
    let description = text(Field::Description);
    let genre = text(Field::Genre);
    let director = text(Field::Director);

    let release_year = match parse_number::<i32>(form, Field::ReleaseYear) {
        Ok(year) if (MIN_RELEASE_YEAR..=current_year.saturating_add(1)).contains(&year) => Some(year),
        Ok(_) => {
            errors.insert(Field::ReleaseYear, FieldError::ReleaseYearOutOfRange);
            None
        }
        Err(err) => {
            errors.insert(Field::ReleaseYear, err);
            None
        }
    };

    let rating = match parse_number::<f64>(form, Field::Rating) {
        Ok(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => Some(rating),
        Ok(_) => {
            errors.insert(Field::Rating, FieldError::RatingOutOfRange);
            None
        }
        Err(err) => {
            errors.insert(Field::Rating, err);
            None
        }
    };

    let poster_url = Some(form.poster_url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    match (release_year, rating) {
        (Some(release_year), Some(rating)) if errors.is_empty() => Ok(MovieDraft {
            title,
            description,
            genre,
            release_year,
            rating,
            director,
            poster_url,
        }),
        _ => Err(errors),
    }
}

fn parse_number<T: std::str::FromStr>(form: &MovieForm, field: Field) -> Result<T, FieldError> {
    let raw = form.get(field).trim();
    if raw.is_empty() {
        return Err(FieldError::Required(field));
    }
    raw.parse().map_err(|_| FieldError::NotANumber(field))
}
