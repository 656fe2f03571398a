use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nine_tiles_core::connection_index::ConnectionIndex;
use nine_tiles_core::partition::{seed_single_piece, seed_two_pieces, SeedTask};
use nine_tiles_core::{analyzer, enumerator, CardCatalogue, PackedRow, StatRecord, TileCatalogue};
use rayon::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod helpers;
mod writer;

static PROGRESS_STYLE: OnceLock<ProgressStyle> = OnceLock::new();

/// Enumerates every acyclic completion of the nine-tile board and writes the
/// derived statistics for each to a sharded columnar file.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the tile catalogue JSON.
    #[arg(env)]
    tiles: PathBuf,

    /// Path to the card catalogue JSON, used only to validate stat keys up front.
    #[arg(env)]
    cards: PathBuf,

    /// Directory under which a fresh `solutions_<N>` output directory is created.
    #[arg(env)]
    output_dir: PathBuf,

    /// Rows buffered per worker before a chunk is flushed to disk.
    #[arg(long, default_value_t = 100_000)]
    chunk_size: usize,

    /// Number of worker threads; defaults to the rayon global pool's default.
    #[arg(long)]
    workers: Option<NonZeroUsize>,

    /// Disables progress bar output.
    #[arg(long)]
    no_progress: bool,

    /// How many pieces to pre-place when partitioning work across workers.
    #[arg(long, default_value_t = 1)]
    seed_depth: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        .init();

    if !cli.no_progress {
        let _ = PROGRESS_STYLE.set(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks {msg}",
            )?
            .progress_chars("##-"),
        );
    }

    if let Some(workers) = cli.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .build_global()?;
    }

    let tiles = TileCatalogue::from_path(&cli.tiles)?;
    let _cards = CardCatalogue::from_path(&cli.cards, StatRecord::FIELDS)?;
    let connection_index = ConnectionIndex::build(&tiles);

    let seed_piece = 0u8;
    let tasks: Vec<SeedTask> = if cli.seed_depth >= 2 {
        seed_two_pieces(seed_piece, &tiles, &connection_index)
    } else {
        seed_single_piece(seed_piece, &tiles)
    };

    let output_dir = helpers::next_numbered_dir(&cli.output_dir, "solutions")?;
    std::fs::create_dir_all(&output_dir)?;
    tracing::info!(tasks = tasks.len(), dir = %output_dir.display(), "starting enumeration");

    let progress_bar = PROGRESS_STYLE.get().map(|style| {
        let bar = ProgressBar::new(tasks.len() as u64);
        bar.set_style(style.clone());
        bar
    });

    let total_rows = AtomicU64::new(0);

    tasks
        .into_par_iter()
        .enumerate()
        .try_for_each(|(worker_id, task)| -> anyhow::Result<()> {
            let rows = run_task(worker_id, task, &tiles, &connection_index, &output_dir, cli.chunk_size)?;
            total_rows.fetch_add(rows, Ordering::Relaxed);
            if let Some(bar) = &progress_bar {
                bar.inc(1);
            }
            Ok(())
        })?;

    if let Some(bar) = progress_bar {
        bar.finish_with_message("done");
    }
    tracing::info!(rows = total_rows.load(Ordering::Relaxed), "enumeration complete");

    Ok(())
}

/// Runs one seed task to exhaustion, writing every completed tiling's packed
/// row to a worker-local shard file. Returns the number of rows written.
fn run_task(
    worker_id: usize,
    task: SeedTask,
    tiles: &TileCatalogue,
    connection_index: &ConnectionIndex,
    output_dir: &std::path::Path,
    chunk_size: usize,
) -> anyhow::Result<u64> {
    let path = output_dir.join(format!("worker_{worker_id:04}.bin"));
    let mut out = writer::ColumnarWriter::create(&path, chunk_size)?;

    let SeedTask {
        mut board,
        mut available,
        uf,
    } = task;

    enumerator::enumerate(&mut board, &mut available, uf, tiles, connection_index, &mut |board| {
        let Some(cells) = board.as_cells() else {
            return;
        };
        match analyzer::analyze(board, tiles) {
            Ok(stats) => {
                if let Err(error) = out.push(PackedRow::new(cells, stats)) {
                    tracing::error!(%error, shard = %path.display(), "failed to write row");
                }
            }
            Err(error) => tracing::warn!(%error, "skipping tiling with a branching road"),
        }
    });

    Ok(out.finish()?)
}
