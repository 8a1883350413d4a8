//! Uniform API response envelope.
//!
//! Every endpoint returns the same wrapper on both success and failure:
//! `{success, message, data, timestamp, statusCode}`. Paged listings wrap
//! their content in [`PagedResponse`] before it goes into `data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Serde adapter rendering timestamps as `yyyy-MM-dd HH:mm:ss` (UTC).
pub mod datetime_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }
}

/// Standard response wrapper returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable description of the outcome
    pub message: String,
    /// Response payload; null on empty successes and on failures without a body
    pub data: Option<T>,
    /// When the response was produced
    #[serde(with = "datetime_format")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub timestamp: DateTime<Utc>,
    /// HTTP status code mirrored into the body
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    /// 200 success with a payload
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
            status_code: 200,
        }
    }

    /// 201 success with a payload
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: 201,
            ..Self::success(data, message)
        }
    }

    /// Success with no payload (e.g. deletes)
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
            status_code: 200,
        }
    }

    /// Failure with no payload, just a message and status
    pub fn error_message(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
            status_code,
        }
    }

    /// Failure with a structured error payload
    pub fn failure(data: T, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
            status_code,
        }
    }
}

/// Paged listing wrapper: content plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    /// Elements of the current page
    pub content: Vec<T>,
    /// Pagination metadata
    pub page: PageMetadata,
}

/// Pagination metadata attached to paged responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Current page number (0-based)
    pub number: u64,
    /// Requested page size
    pub size: u64,
    /// Total number of elements across all pages
    pub total_elements: u64,
    /// Total number of pages
    pub total_pages: u64,
    /// Whether this is the first page
    pub first: bool,
    /// Whether this is the last page
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PagedResponse<T> {
    /// Build a paged response from one page of content and the total count.
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        let has_next = number + 1 < total_pages;
        let has_previous = number > 0;

        Self {
            content,
            page: PageMetadata {
                number,
                size,
                total_elements,
                total_pages,
                first: number == 0,
                last: !has_next,
                has_next,
                has_previous,
            },
        }
    }
}
