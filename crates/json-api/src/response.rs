//! Response envelope and error rendering.
//!
//! Every endpoint answers with `{success, statusCode, message, data}`;
//! list endpoints add a `pagination` block. Business-rule messages pass
//! through verbatim, storage errors are logged and replaced with a
//! generic message.

use dailybrew_app::pagination::Page;
use salvo::{http::StatusCode, prelude::*, writing::Scribe};
use serde::{Deserialize, Serialize};

/// Uniform response body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct PageMeta {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl PageMeta {
    #[must_use]
    pub(crate) fn new(page: Page, total: u64) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total,
            total_pages: total.div_ceil(u64::from(page.page_size)),
        }
    }
}

impl<T> Envelope<T> {
    #[must_use]
    pub(crate) fn ok(data: T) -> Self {
        Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            message: "Success".to_string(),
            data: Some(data),
            pagination: None,
        }
    }

    #[must_use]
    pub(crate) fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            status_code: StatusCode::CREATED.as_u16(),
            message: message.to_string(),
            data: Some(data),
            pagination: None,
        }
    }

    #[must_use]
    pub(crate) fn paginated(data: T, page: Page, total: u64) -> Self {
        Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            message: "Success".to_string(),
            data: Some(data),
            pagination: Some(PageMeta::new(page, total)),
        }
    }
}

impl Envelope<()> {
    /// Success response that carries only a message.
    #[must_use]
    pub(crate) fn message(message: &str) -> Self {
        Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            message: message.to_string(),
            data: None,
            pagination: None,
        }
    }
}

/// An error that renders as the envelope with `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    #[must_use]
    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    #[must_use]
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub(crate) fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        let body = Envelope::<()> {
            success: false,
            status_code: self.status.as_u16(),
            message: self.message,
            data: None,
            pagination: None,
        };

        res.status_code(self.status);
        Json(body).render(res);
    }
}
