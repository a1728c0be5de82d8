use std::borrow::Cow;

use crate::genre::genre_name;

/// One movie as normalized from an upstream discover page.
///
/// Optional numeric fields stay `None` when the upstream omits them; callers
/// that need a number use [`Movie::rating`] and [`Movie::popularity_score`],
/// which read an absent value as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub original_language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_count: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre_ids: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
}

impl Movie {
    pub fn rating(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    pub fn popularity_score(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }

    /// Release date text, with an empty string treated as missing.
    pub fn known_release_date(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|date| !date.is_empty())
    }

    /// First four characters of the release date, or fewer when the date is
    /// short or missing. This is text, not a parsed year.
    pub fn release_year_prefix(&self) -> &str {
        let date = self.release_date.as_deref().unwrap_or("");
        match date.char_indices().nth(4) {
            Some((end, _)) => &date[..end],
            None => date,
        }
    }

    pub fn genre_names(&self) -> Vec<Cow<'static, str>> {
        self.genre_ids.iter().map(|id| genre_name(*id)).collect()
    }
}

/// Listing representation: the movie plus its resolved genre names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MovieView {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub movie: Movie,
    pub genres: Vec<String>,
}

impl From<Movie> for MovieView {
    fn from(movie: Movie) -> Self {
        let genres = movie
            .genre_names()
            .into_iter()
            .map(Cow::into_owned)
            .collect();
        Self { movie, genres }
    }
}

/// Condensed entry used by the top-rated ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopRatedMovie {
    pub id: u64,
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: u64,
    pub release_date: Option<String>,
}

impl From<&Movie> for TopRatedMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            release_date: movie.release_date.clone(),
        }
    }
}
