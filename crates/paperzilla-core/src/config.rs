//! Process configuration.
//!
//! The API base URL and the token file location are read from the
//! environment once, at startup, and then passed explicitly to the
//! `ApiClient` and `TokenStore` constructors.
//!
//! Tokens are stored at `~/.paperzilla/tokens.json` unless `PZ_TOKENS_PATH`
//! points elsewhere.

use std::path::PathBuf;

use anyhow::Result;

/// Production API endpoint
pub const DEFAULT_API_URL: &str = "https://paperzilla.ai";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "PZ_API_URL";

/// Environment variable overriding the token file path
pub const TOKENS_PATH_ENV: &str = "PZ_TOKENS_PATH";

/// Directory under the user's home holding the token file
const APP_DIR: &str = ".paperzilla";

/// Token file name
const TOKENS_FILE: &str = "tokens.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub tokens_path: PathBuf,
}

impl Config {
    /// Build the configuration from `PZ_API_URL` and `PZ_TOKENS_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            non_empty_var(API_URL_ENV),
            non_empty_var(TOKENS_PATH_ENV).map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    /// Apply defaults to the given overrides.
    ///
    /// The home directory is only needed when no token path override is set.
    pub fn resolve(
        api_url: Option<String>,
        tokens_path: Option<PathBuf>,
        home_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let tokens_path = match tokens_path {
            Some(path) => path,
            None => {
                let home = home_dir
                    .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
                home.join(APP_DIR).join(TOKENS_FILE)
            }
        };

        Ok(Self {
            api_url,
            tokens_path,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
