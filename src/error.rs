use crate::remote::error::RemoteError;
use crate::store::error::StoreError;
use crate::types::date::InvalidDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeathervaneError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
