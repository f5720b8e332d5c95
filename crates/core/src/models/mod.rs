pub mod academic;
pub mod auth;
pub mod roster;
pub mod subject;
pub mod timetable;

use serde::{Deserialize, Serialize};

/// Envelope every successful API payload is wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
