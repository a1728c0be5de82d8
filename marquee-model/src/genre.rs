use std::{borrow::Cow, fmt};

/// Genres the catalog knows by name, keyed by their TMDB genre id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Drama,
    Horror,
    Romance,
    ScienceFiction,
    Thriller,
}

impl Genre {
    pub fn all() -> &'static [Genre] {
        use Genre::*;
        &[
            Action,
            Adventure,
            Animation,
            Comedy,
            Drama,
            Horror,
            Romance,
            ScienceFiction,
            Thriller,
        ]
    }

    pub fn tmdb_id(&self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => 16,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::Horror => 27,
            Genre::Romance => 10749,
            Genre::ScienceFiction => 878,
            Genre::Thriller => 53,
        }
    }

    pub fn from_tmdb_id(id: u32) -> Option<Genre> {
        Genre::all().iter().copied().find(|genre| genre.tmdb_id() == id)
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Canonical name for a known genre id, `None` otherwise.
pub fn known_genre(id: u32) -> Option<&'static str> {
    Genre::from_tmdb_id(id).map(|genre| genre.api_name())
}

/// Display name for any genre id. Unknown ids get a synthesized
/// `"Genre {id}"` label, so the result is never empty.
pub fn genre_name(id: u32) -> Cow<'static, str> {
    match known_genre(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Genre {id}")),
    }
}
