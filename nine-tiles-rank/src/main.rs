use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use nine_tiles_core::{CardCatalogue, StatRecord, TileCatalogue};
use nine_tiles_export::{BestSolutions, Percentiles};
use nine_tiles_score::{score_rows, select_all_combinations, PercentileTable};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod helpers;
mod merge;

/// Loads the latest enumeration output, computes percentiles and scores, and
/// writes `best_solutions.json` and `percentiles.json`.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the tile catalogue JSON (only used to size card keys; the
    /// columnar store already carries every statistic).
    #[arg(env)]
    tiles: PathBuf,

    /// Path to the card catalogue JSON.
    #[arg(env)]
    cards: PathBuf,

    /// Directory containing `solutions_<N>` subdirectories written by
    /// `nine-tiles-enumerate`.
    #[arg(env)]
    output_dir: PathBuf,

    /// Directory the two JSON exports are written into. Defaults to
    /// `output_dir`.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        .init();

    let _tiles = TileCatalogue::from_path(&cli.tiles)?;
    let cards = CardCatalogue::from_path(&cli.cards, StatRecord::FIELDS)?;

    let shard_dir = helpers::latest_numbered_dir(&cli.output_dir, "solutions")?;
    tracing::info!(dir = %shard_dir.display(), "merging shards");
    let rows = merge::load_shards(&shard_dir)?;
    tracing::info!(rows = rows.len(), "merged columnar store");

    let stats: Vec<StatRecord> = rows.iter().map(|row| row.stats()).collect();
    let layouts: Vec<_> = rows.iter().map(|row| row.cells()).collect();

    let percentile_table = PercentileTable::build(&stats);
    let row_scores = score_rows(&stats, &cards, &percentile_table);
    let selections = select_all_combinations(&layouts, &row_scores, &cards);

    let mut best_solutions = BestSolutions::default();
    for selection in &selections {
        best_solutions.insert(&selection.card_ids, &selection.cells);
    }
    tracing::info!(combinations = best_solutions.len(), "selected best tilings");

    let mut percentiles = Percentiles::default();
    for (stat_name, column) in percentile_table.columns() {
        percentiles.insert_column(stat_name, column.iter().map(|(&v, &p)| (v, p)));
    }

    let out_dir = cli.out.unwrap_or_else(|| cli.output_dir.clone());
    std::fs::create_dir_all(&out_dir)?;

    let best_path = out_dir.join("best_solutions.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&best_path)?), &best_solutions)?;
    tracing::info!(path = %best_path.display(), "wrote best solutions");

    let percentiles_path = out_dir.join("percentiles.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&percentiles_path)?), &percentiles)?;
    tracing::info!(path = %percentiles_path.display(), "wrote percentiles");

    Ok(())
}
