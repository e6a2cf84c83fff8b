// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the raster-to-vector recognition backend.
//!
//! The backend is a black box that turns a floor plan image into raw
//! geometric JSON. Any failure here is fatal for the current run; retries,
//! if wanted, belong to whatever schedules the pipeline.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rasterplan_core::RawFloorplan;
use std::path::Path;
use thiserror::Error;

/// Errors from the recognition backend.
#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("cannot read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("recognition request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("recognition backend returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("recognition payload is not a floor plan: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the raster-to-vector recognition API.
pub struct Recognizer {
    endpoint: String,
    api_key: Option<String>,
    http: reqwest::blocking::Client,
}

impl Recognizer {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Send an image to the backend and decode the raw floor plan it returns.
    pub fn recognize(&self, image_path: &Path) -> Result<RawFloorplan, RecognizeError> {
        let bytes = std::fs::read(image_path).map_err(|source| RecognizeError::Image {
            path: image_path.display().to_string(),
            source,
        })?;

        let payload = serde_json::json!({ "image": STANDARD.encode(&bytes) });

        let mut request = self.http.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(RecognizeError::Api(response.status()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
