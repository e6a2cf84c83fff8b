// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recognition backend configuration loaded from environment variables.
//!
//! The environment is read only here, at the binary boundary; everything
//! downstream receives an explicit value.

const DEFAULT_ENDPOINT: &str = "https://backend.rasterscan.com/raster-to-vector-base64";

/// Recognition backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raster-to-vector endpoint URL.
    pub recognizer_endpoint: String,
    /// API key sent in the `x-api-key` header, if the backend needs one.
    pub recognizer_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            recognizer_endpoint: std::env::var("RASTER_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.into()),
            recognizer_api_key: std::env::var("RASTER_API_KEY").ok(),
        }
    }
}
