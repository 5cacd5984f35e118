//! Limits applied to incoming pagination requests.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::pagination::{CursorPagination, OffsetPagination};
use crate::{CursorValue, Error, Result, TRACING_TARGET_CONFIG};

// Default values
const DEFAULT_LIMIT: i64 = 20;
const DEFAULT_MAX_LIMIT: i64 = 100;

/// Default and maximum page sizes for requests built from user input.
///
/// Stores never see these limits: they are applied when a request is built,
/// and the normalized values are then forwarded unchanged.
///
/// ## Example
///
/// ```rust
/// use paging_core::PaginationConfig;
///
/// let config = PaginationConfig::default().with_max_limit(50);
/// let pagination = config.offset(Some(500), Some(10));
/// assert_eq!(pagination.limit, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "pagination configurations must be used to build requests"]
pub struct PaginationConfig {
    /// Page size used when a request does not specify one
    #[cfg_attr(
        feature = "config",
        arg(
            long = "paging-default-limit",
            env = "PAGING_DEFAULT_LIMIT",
            default_value = "20"
        )
    )]
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// Largest page size a request may ask for
    #[cfg_attr(
        feature = "config",
        arg(
            long = "paging-max-limit",
            env = "PAGING_MAX_LIMIT",
            default_value = "100"
        )
    )]
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_max_limit() -> i64 {
    DEFAULT_MAX_LIMIT
}

impl PaginationConfig {
    /// Creates a configuration with explicit limits.
    pub fn new(default_limit: i64, max_limit: i64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Sets the default page size.
    pub fn with_default_limit(mut self, default_limit: i64) -> Self {
        self.default_limit = default_limit;
        self
    }

    /// Sets the maximum page size.
    pub fn with_max_limit(mut self, max_limit: i64) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_limit < 1 {
            return Err(Error::invalid_config("max_limit must be at least 1"));
        }

        if !(1..=self.max_limit).contains(&self.default_limit) {
            return Err(Error::invalid_config(format!(
                "default_limit must be between 1 and {}",
                self.max_limit
            )));
        }

        tracing::trace!(
            target: TRACING_TARGET_CONFIG,
            default_limit = self.default_limit,
            max_limit = self.max_limit,
            "Pagination configuration validated"
        );

        Ok(())
    }

    /// Resolves a requested page size against the configured limits.
    ///
    /// Missing or non-positive sizes fall back to the default; larger sizes
    /// are capped at the maximum.
    pub fn resolve_limit(&self, limit: Option<i64>) -> i64 {
        match limit {
            Some(limit) if limit > 0 => limit.min(self.max_limit),
            _ => self.default_limit,
        }
    }

    /// Builds an offset request; negative offsets start at the first row.
    pub fn offset(&self, limit: Option<i64>, offset: Option<i64>) -> OffsetPagination {
        OffsetPagination {
            limit: self.resolve_limit(limit),
            offset: offset.unwrap_or_default().max(0),
        }
    }

    /// Builds an offset request from a 1-based page number.
    pub fn page(&self, page: Option<i64>, page_size: Option<i64>) -> OffsetPagination {
        let limit = self.resolve_limit(page_size);
        let page = page.unwrap_or(1).max(1);
        OffsetPagination {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Builds a cursor request over `field`.
    pub fn cursor(
        &self,
        limit: Option<i64>,
        field: impl Into<String>,
        cursor: Option<CursorValue>,
    ) -> CursorPagination {
        CursorPagination {
            limit: self.resolve_limit(limit),
            field: field.into(),
            cursor,
            reverse: false,
        }
    }

    /// Builds a cursor request from an optional encoded token.
    pub fn cursor_from_token(
        &self,
        limit: Option<i64>,
        field: impl Into<String>,
        token: Option<&str>,
    ) -> Result<CursorPagination> {
        let cursor = token.map(CursorValue::decode).transpose()?;
        Ok(self.cursor(limit, field, cursor))
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_MAX_LIMIT)
    }
}
