//! Sort tokens such as `rating_desc` or `title`.
//!
//! The token splits on the first `_` into a field and a direction. `desc`
//! sorts descending; anything else, or no direction at all, sorts ascending.
//! Unknown fields leave the input order untouched.

use std::{cmp::Ordering, fmt, str::FromStr};

use marquee_model::Movie;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Rating,
    Popularity,
    Title,
    /// First four characters of the release date, compared as text.
    Year,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rating => "rating",
            SortField::Popularity => "popularity",
            SortField::Title => "title",
            SortField::Year => "year",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(SortField::Rating),
            "popularity" => Ok(SortField::Popularity),
            "title" => Ok(SortField::Title),
            "year" => Ok(SortField::Year),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// `None` for a missing token or an unrecognized field.
    pub fn parse(token: Option<&str>) -> Option<Self> {
        let token = token?;
        let (field, direction) = match token.split_once('_') {
            Some((field, direction)) => (field, direction),
            None => (token, ""),
        };

        let field = field.parse::<SortField>().ok()?;
        let order = if direction == "desc" {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        Some(Self { field, order })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        write!(f, "{}_{}", self.field.as_str(), direction)
    }
}

/// Compare two movies under `spec`. Descending flips the ordering, so equal
/// keys stay equal in both directions.
pub fn compare_movies(a: &Movie, b: &Movie, spec: SortSpec) -> Ordering {
    let ord = match spec.field {
        SortField::Rating => {
            OrderedFloat(a.rating()).cmp(&OrderedFloat(b.rating()))
        }
        SortField::Popularity => OrderedFloat(a.popularity_score())
            .cmp(&OrderedFloat(b.popularity_score())),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Year => a.release_year_prefix().cmp(b.release_year_prefix()),
    };

    if spec.order == SortOrder::Descending {
        ord.reverse()
    } else {
        ord
    }
}

/// Stable sort by a parsed spec.
pub fn sort_movies_by(movies: &[Movie], spec: SortSpec) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    sorted.sort_by(|a, b| compare_movies(a, b, spec));
    sorted
}

/// Stable sort by a raw client token; unknown or missing tokens keep the
/// input order.
pub fn sort_movies(movies: &[Movie], token: Option<&str>) -> Vec<Movie> {
    match SortSpec::parse(token) {
        Some(spec) => sort_movies_by(movies, spec),
        None => movies.to_vec(),
    }
}
