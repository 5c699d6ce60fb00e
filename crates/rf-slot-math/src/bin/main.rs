//! Outcome table generator
//!
//! Usage:
//!   outcome-gen generate [--out DIR] [--seed N] [--samples N] [--catalog FILE] [--lenient]
//!   outcome-gen inspect [--catalog FILE]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rf_slot_math::{CatalogParser, GameMode, GenerationPlan, run_plan};

#[derive(Parser)]
#[command(name = "outcome-gen", about = "Cluster-pay outcome table generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and export the outcome table
    Generate {
        /// Output directory
        #[arg(short, long, default_value = "public/outcomes")]
        out: PathBuf,
        /// RNG seed (overrides the catalog)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Outcomes per bucket (overrides the catalog)
        #[arg(long)]
        samples: Option<usize>,
        /// Catalog document (JSON or YAML)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Log bucket mass drift instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Print bucket catalogs and their illustrative expected return
    Inspect {
        /// Catalog document (JSON or YAML)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Log bucket mass drift instead of failing
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            out,
            seed,
            samples,
            catalog,
            lenient,
        } => {
            let parser = CatalogParser::new().lenient(lenient);
            let mut plan = load_plan(&parser, catalog)?;
            parser
                .apply_overrides(&mut plan, seed, samples)
                .context("Invalid command-line override")?;
            generate(&plan, out)
        }
        Commands::Inspect { catalog, lenient } => {
            let plan = load_plan(&CatalogParser::new().lenient(lenient), catalog)?;
            inspect(&plan);
            Ok(())
        }
    }
}

fn load_plan(parser: &CatalogParser, catalog: Option<PathBuf>) -> Result<GenerationPlan> {
    match catalog {
        Some(path) => parser
            .parse_file(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(GenerationPlan::default()),
    }
}

fn generate(plan: &GenerationPlan, out: PathBuf) -> Result<()> {
    let (table, report) = run_plan(plan, &out)
        .with_context(|| format!("Failed to generate outcomes into {}", out.display()))?;

    println!(
        "Exported {} outcomes to {} and CSV summary to {}",
        table.len(),
        report.json_path.display(),
        report.csv_path.display()
    );
    Ok(())
}

fn inspect(plan: &GenerationPlan) {
    println!(
        "seed {}  samples/bucket {}  free spins trigger {}",
        plan.config.seed, plan.config.samples_per_bucket, plan.config.free_spins_trigger_count
    );

    for mode in [GameMode::Base, GameMode::Free] {
        let catalog = plan.catalog(mode);
        println!();
        println!(
            "{:<16} {:>8} {:>8} {:>8} {:>6} {:>6}",
            format!("{} bucket", mode),
            "mass",
            "return",
            "scatter",
            "pick",
            "free"
        );
        println!("{}", "-".repeat(58));
        for bucket in catalog {
            println!(
                "{:<16} {:>8.4} {:>8.2} {:>8} {:>6} {:>6}",
                bucket.name,
                bucket.mass,
                bucket.expected_return,
                bucket.flags.scatter_count,
                bucket.flags.pick_bonus,
                bucket.flags.free_spins_award
            );
        }
        println!(
            "total mass {:.6}  expected return {:.4}",
            catalog.total_mass(),
            catalog.expected_return()
        );
    }
}
