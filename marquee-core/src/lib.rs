//! # Marquee Core
//!
//! Query engine behind the Marquee movie catalog API.
//!
//! ## Overview
//!
//! - **Providers**: [`provider::MovieProvider`] abstracts one upstream page of
//!   movies; [`provider::TmdbDiscoverProvider`] reads TMDB's discover endpoint
//!   and [`provider::CachedProvider`] keeps recent pages in memory.
//! - **Query stages**: [`query`] parses filter and sort expressions and
//!   aggregates per-genre summaries.
//! - **Pipeline**: [`pipeline::QueryPipeline`] runs fetch, filter, sort and
//!   then either slices a listing or builds a summary.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use marquee_core::{
//!     pipeline::{MovieQuery, QueryPipeline},
//!     provider::{TmdbDiscoverProvider, TmdbSettings},
//! };
//!
//! async fn top_action() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = TmdbDiscoverProvider::new(TmdbSettings {
//!         api_key: Some("tmdb-key".to_string()),
//!         ..TmdbSettings::default()
//!     })?;
//!     let pipeline = QueryPipeline::new(Arc::new(provider));
//!
//!     let listing = pipeline
//!         .list_movies(&MovieQuery {
//!             sort: Some("rating_desc".to_string()),
//!             filter: Some("genre:action".to_string()),
//!             ..MovieQuery::default()
//!         })
//!         .await?;
//!     println!("{} matching movies", listing.total_items);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

pub mod error;
pub mod pipeline;
pub mod provider;
pub mod query;

pub use error::{QueryError, Result};
pub use marquee_model;
pub use pipeline::{MovieQuery, QueryPipeline, SummaryQuery};
pub use provider::{MovieProvider, ProviderError};
