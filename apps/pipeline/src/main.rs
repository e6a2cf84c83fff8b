// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: run the floor plan processing pipeline
//!
//! Loads (or recognizes) raw floor plan geometry, cleans it into the
//! canonical model, and applies a spatial edit such as adding a bedroom.
//!
//! Usage:
//!   rasterplan <raw_json_path> [options]

use std::env;
use std::path::PathBuf;
use std::process;

use rasterplan_core::{Action, CleanConfig};

mod config;
mod io;
mod pipeline;
mod recognizer;

use config::Config;
use pipeline::{run, PipelineConfig};
use recognizer::Recognizer;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let raw_path = PathBuf::from(&args[1]);

    // Parse options
    let mut out_dir = PathBuf::from("outputs");
    let mut snap_threshold: f64 = 5.0;
    let mut min_area: f64 = 10000.0;
    let mut image: Option<PathBuf> = None;
    let mut action = Some(Action::AddBedroom { min_area });

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                i += 1;
                out_dir = PathBuf::from(&args[i]);
            }
            "--snap-threshold" => {
                i += 1;
                snap_threshold = args[i].parse().expect("Invalid snap threshold value");
            }
            "--min-area" => {
                i += 1;
                min_area = args[i].parse().expect("Invalid min area value");
                action = Some(Action::AddBedroom { min_area });
            }
            "--recognize" => {
                i += 1;
                image = Some(PathBuf::from(&args[i]));
            }
            "--remove-room" => {
                i += 1;
                action = Some(Action::RemoveRoom {
                    room_id: args[i].clone(),
                });
            }
            "--resize-room" => {
                let room_id = args[i + 1].clone();
                let factor = args[i + 2].parse().expect("Invalid resize factor value");
                i += 2;
                action = Some(Action::ResizeRoom { room_id, factor });
            }
            "--skip-optimize" => {
                action = None;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== Floor Plan Processing Pipeline ===");

    let recognizer = image.as_ref().map(|_| {
        let env_config = Config::from_env();
        Recognizer::new(
            &env_config.recognizer_endpoint,
            env_config.recognizer_api_key,
        )
    });

    let pipeline_config = PipelineConfig {
        raw_path,
        image_path: image,
        cleaned_path: out_dir.join("cleaned_canonical.json"),
        optimized_path: out_dir.join("optimized.json"),
        clean: CleanConfig {
            snap_threshold,
            ..CleanConfig::default()
        },
        action,
    };

    match run(&pipeline_config, recognizer.as_ref()) {
        Ok(summary) => {
            println!();
            println!("Pipeline complete");
            println!("  Raw rooms:       {}", summary.raw_room_count);
            println!("  Cleaned rooms:   {}", summary.cleaned_room_count);
            if let Some(count) = summary.optimized_room_count {
                println!("  Optimized rooms: {}", count);
            }
            if let Some(bedrooms) = summary.bedroom_count {
                println!("  Total bedrooms:  {}", bedrooms);
            }
            println!("  Total area:      {:.2}", summary.total_area);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Floor plan processing pipeline");
    println!();
    println!("Usage:");
    println!("  rasterplan <raw_json_path> [options]");
    println!();
    println!("The raw JSON file is the recognizer output. When it does not exist");
    println!("and --recognize is given, the image is sent to the recognition");
    println!("backend first (set RASTER_API_KEY / RASTER_ENDPOINT).");
    println!();
    println!("Options:");
    println!("  --out-dir <dir>               Output directory (default: outputs)");
    println!("  --snap-threshold <dist>       Wall endpoint snap distance (default: 5.0)");
    println!("  --min-area <area>             Reserved bedroom-split constraint (default: 10000)");
    println!("  --recognize <image>           Recognize this image when raw JSON is missing");
    println!("  --remove-room <room_id>       Remove a room instead of adding a bedroom");
    println!("  --resize-room <room_id> <f>   Scale a room about its centroid");
    println!("  --skip-optimize               Stop after the cleaning stage");
}
