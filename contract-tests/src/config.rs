//! Where the contract suite points.
//!
//! `TODO_BASE_URL` and `TODO_SESSION_COOKIE` select a live service; a `.env`
//! file in the working directory is honoured. With neither set the harness
//! runs against an in-process mock server instead.

use thiserror::Error;

pub const BASE_URL_VAR: &str = "TODO_BASE_URL";
pub const COOKIE_VAR: &str = "TODO_SESSION_COOKIE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{set} is set but {missing} is not; set both to test a live server")]
    Incomplete {
        set: &'static str,
        missing: &'static str,
    },
}

/// Target service and the pre-authorized session used for every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub cookie: String,
}

impl HarnessConfig {
    /// `Ok(None)` means no live server is configured.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).filter(|v| !v.is_empty());
        let cookie = lookup(COOKIE_VAR).filter(|v| !v.is_empty());
        match (base_url, cookie) {
            (Some(base_url), Some(cookie)) => Ok(Some(Self { base_url, cookie })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::Incomplete {
                set: BASE_URL_VAR,
                missing: COOKIE_VAR,
            }),
            (None, Some(_)) => Err(ConfigError::Incomplete {
                set: COOKIE_VAR,
                missing: BASE_URL_VAR,
            }),
        }
    }
}
