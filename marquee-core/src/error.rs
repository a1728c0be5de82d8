use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
