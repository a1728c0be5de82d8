use axum::{
    Json,
    extract::{Query, State},
};
use marquee_core::pipeline::{
    DEFAULT_LIMIT, DEFAULT_PAGE, MovieQuery, SummaryQuery,
};
use marquee_model::{MovieListing, MoviesSummary};
use thiserror::Error;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Raw query string pairs, in request order. Extracting pairs instead of a
/// struct keeps a repeated key from failing deserialization; the last value
/// wins.
type QueryPairs = Vec<(String, String)>;

/// `page` and `limit` are validated by hand so a bad value gets the same
/// `{"detail": ...}` body as every other error.
#[derive(Debug, Default)]
pub struct MoviesParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Default)]
pub struct SummaryParams {
    pub page: Option<String>,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

impl FromIterator<(String, String)> for MoviesParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(value),
                "limit" => params.limit = Some(value),
                "sort" => params.sort = Some(value),
                "filter" => params.filter = Some(value),
                _ => {}
            }
        }
        params
    }
}

impl FromIterator<(String, String)> for SummaryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(value),
                "sort" => params.sort = Some(value),
                "filter" => params.filter = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid '{0}' parameter")]
    InvalidParameter(&'static str),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// Positive integer, or `default` when absent. A blank value is invalid.
fn positive_param(
    raw: Option<&str>,
    name: &'static str,
    default: u32,
) -> Result<u32, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidParameter(name)),
    }
}

impl TryFrom<MoviesParams> for MovieQuery {
    type Error = ValidationError;

    fn try_from(params: MoviesParams) -> Result<Self, Self::Error> {
        Ok(Self {
            page: positive_param(
                params.page.as_deref(),
                "page",
                DEFAULT_PAGE,
            )?,
            limit: positive_param(
                params.limit.as_deref(),
                "limit",
                DEFAULT_LIMIT,
            )?,
            sort: params.sort,
            filter: params.filter,
        })
    }
}

impl TryFrom<SummaryParams> for SummaryQuery {
    type Error = ValidationError;

    fn try_from(params: SummaryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            page: positive_param(
                params.page.as_deref(),
                "page",
                DEFAULT_PAGE,
            )?,
            sort: params.sort,
            filter: params.filter,
        })
    }
}

/// Filtered, sorted and limited view of one upstream page
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<Json<MovieListing>> {
    let query = MovieQuery::try_from(MoviesParams::from_iter(pairs))?;
    let listing = state.pipeline.list_movies(&query).await?;
    Ok(Json(listing))
}

/// Aggregate statistics over one filtered upstream page
pub async fn movies_summary_handler(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<Json<MoviesSummary>> {
    let query = SummaryQuery::try_from(SummaryParams::from_iter(pairs))?;
    let summary = state.pipeline.summarize_movies(&query).await?;
    Ok(Json(summary))
}
