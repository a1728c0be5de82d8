//! HTTP request handlers organized by functionality

pub mod health;
pub mod movies;

pub use health::{health_handler, ping_handler};
pub use movies::{list_movies_handler, movies_summary_handler};
