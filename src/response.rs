use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
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
}

/// Envelope shared by every endpoint: `{code, message, data, error, meta}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
            error: None,
            meta,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 201,
            message: message.into(),
            data: Some(data),
            error: None,
            meta: Some(Meta::empty()),
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: u16, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            error: Some(error.into()),
            meta: Some(Meta::empty()),
        }
    }
}

/// Payload of a successful soft delete.
#[derive(Debug, Serialize, ToSchema, Clone, Copy)]
pub struct Deleted {
    pub id: i32,
}
