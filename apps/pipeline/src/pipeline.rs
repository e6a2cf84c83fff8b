// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Three-stage floor plan pipeline: recognize, clean, optimize.
//!
//! Each stage persists its artifact only after it succeeds, so a failed
//! stage never leaves a partial output behind. Errors name the stage that
//! failed.

use std::path::PathBuf;

use rasterplan_core::{clean_floorplan, Action, CleanConfig, OptimizeError, RawFloorplan};
use thiserror::Error;

use crate::io::{load_json, save_json, JsonIoError};
use crate::recognizer::{RecognizeError, Recognizer};

/// Pipeline failure, tagged with the stage that caused it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("recognition stage failed: {0}")]
    Recognition(#[from] RecognizeError),

    #[error("recognition stage failed: no raw output at {} and no image to recognize", .0.display())]
    MissingInput(PathBuf),

    #[error("recognition stage failed: {0}")]
    RawInput(#[source] JsonIoError),

    #[error("cleaning stage failed: {0}")]
    Cleaning(#[source] JsonIoError),

    #[error("optimization stage failed: {0}")]
    Optimization(#[source] OptimizationError),
}

/// What went wrong inside the optimization stage.
#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error(transparent)]
    Edit(#[from] OptimizeError),

    #[error(transparent)]
    Persist(#[from] JsonIoError),
}

/// What the pipeline should run and where artifacts land.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw recognizer output. When the file exists recognition is skipped
    /// and the cached payload is used instead.
    pub raw_path: PathBuf,
    /// Image to recognize when `raw_path` is missing.
    pub image_path: Option<PathBuf>,
    /// Where the cleaned canonical floor plan is written.
    pub cleaned_path: PathBuf,
    /// Where the optimized floor plan is written.
    pub optimized_path: PathBuf,
    pub clean: CleanConfig,
    /// Edit applied in the optimization stage; `None` stops after cleaning.
    pub action: Option<Action>,
}

/// Counters reported after a successful run.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub raw_room_count: usize,
    pub cleaned_room_count: usize,
    pub optimized_room_count: Option<usize>,
    pub bedroom_count: Option<usize>,
    pub total_area: f64,
}

/// Run the pipeline end to end.
pub fn run(
    config: &PipelineConfig,
    recognizer: Option<&Recognizer>,
) -> Result<PipelineSummary, PipelineError> {
    // Stage 1: raw geometry, from cache or from the recognition backend
    let raw: RawFloorplan = if config.raw_path.exists() {
        tracing::info!(path = %config.raw_path.display(), "loading recognizer output");
        load_json(&config.raw_path).map_err(PipelineError::RawInput)?
    } else {
        let (recognizer, image_path) = match (recognizer, &config.image_path) {
            (Some(recognizer), Some(image_path)) => (recognizer, image_path),
            _ => return Err(PipelineError::MissingInput(config.raw_path.clone())),
        };

        tracing::info!(image = %image_path.display(), "recognizing floor plan");
        let raw = recognizer.recognize(image_path)?;
        save_json(&raw, &config.raw_path).map_err(PipelineError::RawInput)?;
        raw
    };

    tracing::info!(
        rooms = raw.rooms.len(),
        walls = raw.walls.len(),
        doors = raw.doors.len(),
        "raw geometry loaded"
    );

    // Stage 2: clean and persist the canonical floor plan
    let cleaned = clean_floorplan(&raw, &config.clean);
    save_json(&cleaned, &config.cleaned_path).map_err(PipelineError::Cleaning)?;
    tracing::info!(
        rooms = cleaned.rooms.len(),
        total_area = cleaned.total_area,
        path = %config.cleaned_path.display(),
        "cleaned floor plan saved"
    );

    let mut summary = PipelineSummary {
        raw_room_count: raw.rooms.len(),
        cleaned_room_count: cleaned.rooms.len(),
        optimized_room_count: None,
        bedroom_count: None,
        total_area: cleaned.total_area,
    };

    // Stage 3: apply the requested edit and persist the result
    if let Some(action) = &config.action {
        let optimized = action
            .apply(&cleaned)
            .map_err(|e| PipelineError::Optimization(e.into()))?;
        save_json(&optimized, &config.optimized_path)
            .map_err(|e| PipelineError::Optimization(e.into()))?;

        let bedrooms = optimized
            .rooms
            .iter()
            .filter(|r| r.room_type.to_lowercase().contains("bedroom"))
            .count();
        tracing::info!(
            rooms = optimized.rooms.len(),
            bedrooms,
            path = %config.optimized_path.display(),
            "optimized floor plan saved"
        );

        summary.optimized_room_count = Some(optimized.rooms.len());
        summary.bedroom_count = Some(bedrooms);
        summary.total_area = optimized.total_area;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterplan_core::Floorplan;
    use std::fs;
    use std::path::Path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rasterplan-pipeline-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_raw(path: &Path) {
        fs::write(
            path,
            r#"{
                "rooms": [
                    [{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 10}, {"x": 0, "y": 10}],
                    [{"x": 20, "y": 0}, {"x": 30, "y": 0}, {"x": 30, "y": 5}, {"x": 20, "y": 5}]
                ],
                "walls": [{"position": [[0, 0], [10, 0]]}],
                "doors": [],
                "perimeter": 60.0
            }"#,
        )
        .unwrap();
    }

    fn config_in(dir: &Path, action: Option<Action>) -> PipelineConfig {
        PipelineConfig {
            raw_path: dir.join("raw.json"),
            image_path: None,
            cleaned_path: dir.join("cleaned.json"),
            optimized_path: dir.join("optimized.json"),
            clean: CleanConfig::default(),
            action,
        }
    }

    #[test]
    fn test_run_full_pipeline_from_cached_raw() {
        let dir = scratch_dir("full");
        let config = config_in(&dir, Some(Action::AddBedroom { min_area: 10000.0 }));
        write_raw(&config.raw_path);

        let summary = run(&config, None).unwrap();

        assert_eq!(summary.raw_room_count, 2);
        assert_eq!(summary.cleaned_room_count, 2);
        assert_eq!(summary.optimized_room_count, Some(3));
        assert_eq!(summary.bedroom_count, Some(1));
        assert!((summary.total_area - 150.0).abs() < 1e-9);

        let cleaned: Floorplan = load_json(&config.cleaned_path).unwrap();
        assert_eq!(cleaned.rooms.len(), 2);
        let optimized: Floorplan = load_json(&config.optimized_path).unwrap();
        assert_eq!(optimized.rooms.len(), 3);
        assert_eq!(optimized.metadata["action"], "add_bedroom");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_without_action_stops_after_cleaning() {
        let dir = scratch_dir("clean-only");
        let config = config_in(&dir, None);
        write_raw(&config.raw_path);

        let summary = run(&config, None).unwrap();

        assert_eq!(summary.optimized_room_count, None);
        assert!(config.cleaned_path.exists());
        assert!(!config.optimized_path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_missing_input_names_recognition_stage() {
        let dir = scratch_dir("missing");
        let config = config_in(&dir, None);

        let err = run(&config, None).unwrap_err();

        assert!(matches!(err, PipelineError::MissingInput(_)));
        assert!(err.to_string().contains("recognition stage failed"));
        assert!(!config.cleaned_path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_failed_optimization_writes_no_artifact() {
        let dir = scratch_dir("bad-action");
        let config = config_in(
            &dir,
            Some(Action::RemoveRoom {
                room_id: "no_such_room".to_string(),
            }),
        );
        write_raw(&config.raw_path);

        let err = run(&config, None).unwrap_err();

        assert!(err.to_string().contains("optimization stage failed"));
        // The cleaning artifact survives; the optimization one was never written
        assert!(config.cleaned_path.exists());
        assert!(!config.optimized_path.exists());

        fs::remove_dir_all(&dir).ok();
    }
}
