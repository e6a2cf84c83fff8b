// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON persistence for pipeline artifacts.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors while reading or writing a JSON artifact.
#[derive(Debug, Error)]
pub enum JsonIoError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and decode a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, JsonIoError> {
    let text = fs::read_to_string(path).map_err(|source| JsonIoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| JsonIoError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Pretty-print a value to a JSON file, creating parent directories.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), JsonIoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| JsonIoError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let text = serde_json::to_string_pretty(value).map_err(|source| JsonIoError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, text).map_err(|source| JsonIoError::Io {
        path: path.display().to_string(),
        source,
    })
}
