//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod genre;
pub mod movie;
pub mod summary;

pub use genre::{Genre, genre_name, known_genre};
pub use movie::{Movie, MovieView, TopRatedMovie};
pub use summary::{GenreSummary, MovieListing, MoviesSummary};
