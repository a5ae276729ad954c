//! Fast micro-benchmarks for the memindex B-tree.
//!
//! Provides quick insert/search timing with minimal overhead. This binary is
//! a throwaway driver around the library; it is not part of the index API.

use std::time::{Duration, Instant};

use clap::Parser;
use memindex::data_generator::{DataGenerator, KeyDistribution};
use memindex::{logging, BTree, BTreeStatsSnapshot};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "fast-bench", about = "Insert/search timing for the memindex B-tree")]
struct Args {
    /// Number of keys to insert
    #[arg(long, default_value_t = 100_000, env = "MEMINDEX_BENCH_KEYS")]
    keys: usize,

    /// Number of lookups to time (half present, half absent)
    #[arg(long, default_value_t = 50_000)]
    searches: usize,

    /// Minimum degree of the tree
    #[arg(long, default_value_t = 16)]
    degree: usize,

    /// RNG seed for key generation and lookup sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Shape of the generated key set
    #[arg(long, value_enum, default_value = "uniform")]
    distribution: KeyDistribution,

    /// Emit results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Tracing filter directive
    #[arg(long, default_value = "warn", env = "MEMINDEX_LOG")]
    log: String,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    ops: usize,
    micros: u64,
}

impl BenchResult {
    fn print_header(section: &str) {
        println!("\n{}", section.to_uppercase());
        println!("{:<20} {:>10} {:>15}", "BENCHMARK", "OPS", "TIME");
    }

    fn print(&self) {
        let time_str = format_duration(Duration::from_micros(self.micros));
        println!("{:<20} {:>10} {:>15}", self.name, self.ops, time_str);
    }
}

#[derive(Debug, Serialize)]
struct Report {
    keys: usize,
    degree: usize,
    seed: u64,
    height: usize,
    results: Vec<BenchResult>,
    stats: BTreeStatsSnapshot,
}

fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1_000 {
        format!("{} µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2} ms", micros as f64 / 1_000.0)
    } else {
        format!("{:.2} s", micros as f64 / 1_000_000.0)
    }
}

/// Run a benchmark closure and measure wall time.
fn bench<F>(name: &str, ops: usize, f: F) -> BenchResult
where
    F: FnOnce(),
{
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();

    BenchResult {
        name: name.to_string(),
        ops,
        micros: elapsed.as_micros() as u64,
    }
}

fn main() -> memindex::Result<()> {
    let args = Args::parse();
    logging::init_logging(&args.log)?;

    let mut generator = DataGenerator::with_seed(args.seed);
    let keys = generator.generate_keys(args.keys, args.distribution);

    let mut tree = BTree::new(args.degree)?;
    let mut results = Vec::new();

    results.push(bench("Insert", keys.len(), || {
        for key in &keys {
            tree.insert(*key);
        }
    }));

    // Sample present keys for hits; absent lookups probe just past the key
    // space, which Uniform and Sequential distributions leave unused.
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let hits: Vec<u64> = keys
        .choose_multiple(&mut rng, args.searches / 2)
        .copied()
        .collect();
    let max_key = keys.iter().copied().max().unwrap_or(0);

    results.push(bench("Search hit", hits.len(), || {
        for key in &hits {
            std::hint::black_box(tree.search(key));
        }
    }));

    let misses = args.searches - args.searches / 2;
    results.push(bench("Search miss", misses, || {
        for offset in 0..misses as u64 {
            std::hint::black_box(tree.search(&(max_key.wrapping_add(1 + offset))));
        }
    }));

    let stats = tree.stats();
    stats.log_summary();

    let report = Report {
        keys: keys.len(),
        degree: args.degree,
        seed: args.seed,
        height: tree.height(),
        results,
        stats: stats.snapshot(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| memindex::IndexError::InvalidArgument(e.to_string()))?
        );
    } else {
        println!("=== memindex Fast Benchmarks ===");
        BenchResult::print_header("btree");
        for result in &report.results {
            result.print();
        }
        println!(
            "\nheight: {}, leaf splits: {}, internal splits: {}, root splits: {}",
            report.height,
            report.stats.leaf_splits,
            report.stats.internal_splits,
            report.stats.root_splits
        );
        println!("\n=== Benchmarks Complete ===");
    }

    Ok(())
}
