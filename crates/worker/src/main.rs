// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lectern worker daemon (lecternd)
//!
//! Runs N independent worker loops over the shared job queue. Multiple
//! lecternd processes may point at the same state directory; the claim
//! protocol keeps them from double-processing.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use lectern_adapters::{HttpBlobStore, RestContentStore, TracedQueue};
use lectern_core::SystemClock;
use lectern_genai::GeminiClient;
use lectern_queue::FileQueue;
use lectern_worker::{HandlerContext, Worker, WorkerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("lecternd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("lecternd {}", env!("CARGO_PKG_VERSION"));
                println!("Lectern worker daemon - claims and processes lecture jobs");
                println!();
                println!("USAGE:");
                println!("    lecternd");
                println!();
                println!("Configuration comes from the environment (GEMINI_API_KEY,");
                println!("BLOB_PUBLIC_BASE_URL, CONTENT_API_BASE_URL, JOB_* overrides).");
                println!("Run lectern-sweep on a schedule to reclaim jobs abandoned");
                println!("by dead workers.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: lecternd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    // Unrecoverable configuration problems abort before any loop starts.
    let config = Arc::new(WorkerConfig::from_env()?);

    let _log_guard = setup_logging();

    info!(
        instance_id = %config.instance_id,
        concurrency = config.concurrency,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        max_attempts = config.max_attempts,
        state_dir = %config.state_dir.display(),
        "starting lecternd"
    );

    let store = Arc::new(TracedQueue::new(FileQueue::new(config.jobs_path())));
    let ctx = Arc::new(HandlerContext {
        content: RestContentStore::new(config.content_api_base_url.clone()),
        artifacts: HttpBlobStore::new(config.blob_base_url.clone()),
        generator: GeminiClient::new(config.gemini.clone()),
        config: config.clone(),
    });

    let mut workers = Vec::new();
    for index in 1..=config.concurrency {
        let worker = Worker::new(
            store.clone(),
            ctx.clone(),
            SystemClock,
            format!("{}:{}", config.instance_id, index),
        );
        workers.push(tokio::spawn(async move { worker.run().await }));
    }

    // Workers run until the process is told to stop; abandoned claims are
    // repaired by the out-of-band sweep.
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, exiting");
    for worker in &workers {
        worker.abort();
    }

    Ok(())
}

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LECTERN_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();
    guard
}
