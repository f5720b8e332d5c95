use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use schooltime_core::{errors::SchoolError, validation::Validate};
use serde::de::DeserializeOwned;

use crate::middleware::error_handling::AppError;

/// A JSON body that deserialized and passed [`Validate`].
///
/// Malformed JSON and failed field checks are both rejected with a 400 listing the issues.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| SchoolError::InvalidRequest(vec![rejection.body_text()]))?;

        value.validate().map_err(SchoolError::InvalidRequest)?;
        Ok(Self(value))
    }
}
