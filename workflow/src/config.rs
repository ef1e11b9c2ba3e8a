//! Client configuration: API base, storage key, page sizes and limits.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::query::{PAGE_SIZES, PageSize};
use crate::store::TOKEN_KEY;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_MAX_PDF_MB: u32 = 5;
pub const DEFAULT_REDIRECT_DELAY_MS: u32 = 1500;
pub const TITLE_WORD_LIMIT: usize = 50;
pub const CONTENT_WORD_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be one of {allowed:?}, got {value}")]
    InvalidPageSize { var: &'static str, value: u32, allowed: [u32; 3] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub token_key: String,
    pub default_page_size: PageSize,
    pub max_pdf_mb: u32,
    pub redirect_delay_ms: u32,
    pub title_word_limit: usize,
    pub content_word_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token_key: TOKEN_KEY.to_owned(),
            default_page_size: PageSize::default(),
            max_pdf_mb: DEFAULT_MAX_PDF_MB,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            title_word_limit: TITLE_WORD_LIMIT,
            content_word_limit: CONTENT_WORD_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `REVIEW_API_BASE`: default `/api`
    /// - `REVIEW_PAGE_SIZE`: one of 10, 20, 50 (default 10)
    /// - `REVIEW_MAX_PDF_MB`: default 5
    /// - `REVIEW_REDIRECT_DELAY_MS`: default 1500
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup("REVIEW_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_owned();
        }
        if let Some(size) = parse_u32(&lookup, "REVIEW_PAGE_SIZE")? {
            config.default_page_size = PageSize::try_from(size).map_err(|value| ConfigError::InvalidPageSize {
                var: "REVIEW_PAGE_SIZE",
                value,
                allowed: PAGE_SIZES,
            })?;
        }
        if let Some(mb) = parse_u32(&lookup, "REVIEW_MAX_PDF_MB")? {
            config.max_pdf_mb = mb;
        }
        if let Some(ms) = parse_u32(&lookup, "REVIEW_REDIRECT_DELAY_MS")? {
            config.redirect_delay_ms = ms;
        }
        Ok(config)
    }

    /// Upload size limit in bytes.
    pub fn max_pdf_bytes(&self) -> u64 {
        u64::from(self.max_pdf_mb) * 1024 * 1024
    }
}

fn parse_u32<F>(lookup: &F, var: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}
