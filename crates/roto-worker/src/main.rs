//! Motion-mask pipeline binary.

use std::io::Write;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roto_worker::{run_pipeline, PipelineArgs};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("roto_worker=info".parse().unwrap())
        .add_directive("roto_media=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let config = match PipelineArgs::parse().validate() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        chunk_size = config.chunk_size,
        blur_iterations = config.blur_iterations,
        "starting pipeline"
    );

    let progress = Box::new(|p: roto_models::PipelineProgress| {
        print!(
            "\r{:3.0}% done. Processing frame {}/{}. {:.0}ms per frame.",
            p.percentage(),
            p.frames_done,
            p.total_frames,
            p.avg_millis_per_frame
        );
        std::io::stdout().flush().ok();
    });

    match run_pipeline(&config, Some(progress)).await {
        Ok(summary) => {
            println!();
            info!(
                total_frames = summary.total_frames,
                deltas_written = summary.deltas_written,
                failed = summary.error_count(),
                "done"
            );
            for failed in &summary.failed_frames {
                error!(
                    index = failed.index,
                    path = %failed.source_path.display(),
                    "frame skipped: {}",
                    failed.reason
                );
            }
        }
        Err(e) => {
            println!();
            error!("Pipeline failed: {}", e);
            std::process::exit(1);
        }
    }
}
