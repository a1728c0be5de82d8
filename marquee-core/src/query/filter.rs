//! Filter expressions for movie listings.
//!
//! Clients send a compact expression such as
//! `year:2023,language:en,genre:Action`. [`FilterSpec::parse`] turns it into
//! a key/value map and [`filter_movies`] keeps the movies that satisfy every
//! recognized clause.
//!
//! Recognized keys:
//!
//! - `year`: release date text starts with the value (movies without a release
//!   date never match)
//! - `language`: exact match on `original_language`
//! - `min_rating`: `vote_average` (absent as `0`) is at least the value; a
//!   value that does not parse as a number leaves the clause out
//! - `genre`: case-insensitive match against the movie's genre names
//!
//! Any other key is kept by the parser but has no effect.

use std::collections::HashMap;

use marquee_model::Movie;
use tracing::debug;

pub const YEAR_KEY: &str = "year";
pub const LANGUAGE_KEY: &str = "language";
pub const MIN_RATING_KEY: &str = "min_rating";
pub const GENRE_KEY: &str = "genre";

/// Parsed filter expression. Empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    entries: HashMap<String, String>,
}

impl FilterSpec {
    /// Parse `key:value(,key:value)*`.
    ///
    /// Tokens without a colon are dropped. Keys are trimmed and lower-cased,
    /// values trimmed. A repeated key keeps the last value.
    pub fn parse(expr: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        let Some(expr) = expr else {
            return Self { entries };
        };

        for token in expr.split(',') {
            if let Some((key, value)) = token.split_once(':') {
                entries.insert(
                    key.trim().to_lowercase(),
                    value.trim().to_string(),
                );
            }
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_lowercase(), value.to_string());
        self
    }

    // Empty values constrain nothing.
    fn clause(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    fn predicate(&self) -> MoviePredicate<'_> {
        let min_rating = self.clause(MIN_RATING_KEY).and_then(|raw| {
            match raw.parse::<f64>() {
                Ok(threshold) if !threshold.is_nan() => Some(threshold),
                _ => {
                    debug!(
                        value = raw,
                        "ignoring non-numeric min_rating filter"
                    );
                    None
                }
            }
        });

        MoviePredicate {
            year: self.clause(YEAR_KEY),
            language: self.clause(LANGUAGE_KEY),
            min_rating,
            genre: self.clause(GENRE_KEY).map(str::to_lowercase),
        }
    }
}

/// Clauses resolved once per `filter_movies` call.
#[derive(Debug)]
struct MoviePredicate<'a> {
    year: Option<&'a str>,
    language: Option<&'a str>,
    min_rating: Option<f64>,
    genre: Option<String>,
}

impl MoviePredicate<'_> {
    fn matches(&self, movie: &Movie) -> bool {
        if let Some(year) = self.year {
            match movie.known_release_date() {
                Some(date) if date.starts_with(year) => {}
                _ => return false,
            }
        }

        if let Some(language) = self.language
            && movie.original_language != language
        {
            return false;
        }

        if let Some(threshold) = self.min_rating
            && movie.rating() < threshold
        {
            return false;
        }

        if let Some(genre) = self.genre.as_deref()
            && !movie
                .genre_names()
                .iter()
                .any(|name| name.to_lowercase() == genre)
        {
            return false;
        }

        true
    }
}

/// Keep the movies satisfying every clause of `spec`, in input order.
pub fn filter_movies(movies: &[Movie], spec: &FilterSpec) -> Vec<Movie> {
    if spec.is_empty() {
        return movies.to_vec();
    }

    let predicate = spec.predicate();
    movies
        .iter()
        .filter(|movie| predicate.matches(movie))
        .cloned()
        .collect()
}
