//! Success response envelope

use serde::Serialize;

/// `{"data": ...}` wrapper used by every successful roster response
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
