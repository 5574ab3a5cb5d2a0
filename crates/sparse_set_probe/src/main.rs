//! # sparse_set_probe
//!
//! Runs a synthetic ID workload through a [`sparse_set::SparseSet`] and
//! reports how the paged sparse side behaved.
//!
//! ## Workload
//!
//! 1. Insert `start + n * stride` for `n` in `0..count`.
//! 2. Remove every `remove_every`-th of those IDs.
//! 3. Check that every surviving entry locates back to its own slot.
//! 4. Report occupancy and page usage, as log lines or JSON.

mod workload;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workload::WorkloadConfig;

#[derive(Parser)]
#[command(name = "sparse_set_probe", about = "Inspect sparse set paging under synthetic ID workloads")]
struct Args {
    /// Number of IDs to insert
    #[arg(short, long, default_value_t = 10_000)]
    count: u32,

    /// First ID inserted
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Gap between consecutive IDs
    #[arg(short, long, default_value_t = 1)]
    stride: u32,

    /// Remove every n-th inserted ID (0 = none)
    #[arg(short, long, default_value_t = 0)]
    remove_every: u32,

    /// IDs covered by one sparse page (power of two, at most 2^20)
    #[arg(short, long, default_value_t = sparse_set::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sparse_set_probe=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = WorkloadConfig {
        start: args.start,
        stride: args.stride,
        count: args.count,
        remove_every: args.remove_every,
        page_size: args.page_size,
    };
    info!(?config, "running workload");

    let report = workload::run(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            len = report.len,
            inserted = report.inserted,
            removed = report.removed,
            "dense arrays"
        );
        info!(
            page_size = report.page_size,
            allocated_pages = report.allocated_pages,
            page_table_len = report.page_table_len,
            sparse_bytes = report.sparse_bytes,
            flat_bytes = report.flat_bytes,
            "sparse pages"
        );
    }

    Ok(())
}
