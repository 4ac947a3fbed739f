use serde::Serialize;
use utoipa::ToSchema;

/// Pagination block attached to list responses; all fields are null otherwise.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }

    /// Total-only meta for unpaginated lists.
    pub fn count(total: usize) -> Self {
        Self {
            page: None,
            per_page: None,
            total: Some(total as i64),
        }
    }
}

/// Envelope shared by every endpoint: `{ message, data, meta }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn list(message: impl Into<String>, items: Vec<T>, meta: Meta) -> ApiResponse<ListData<T>> {
        ApiResponse {
            message: message.into(),
            data: Some(ListData { items }),
            meta: Some(meta),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListData<T> {
    pub items: Vec<T>,
}
