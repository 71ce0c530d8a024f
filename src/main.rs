mod error;
mod models;
mod output;
mod pipeline;
mod settings;
mod source;
mod utils;

use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::info;

use settings::{Overrides, Settings};
use source::SourceTables;

#[derive(Parser)]
#[command(name = "sitegen", about = "Electrolysis directory page generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build page payloads, route manifest, summary and sitemap from the CSV exports
    Generate {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Run the pipeline in memory and print counts without writing anything
    Stats {
        #[command(flatten)]
        overrides: Overrides,
        /// Co-listed categories to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { overrides } => {
            let settings = Settings::load(&overrides).context("Failed to load settings")?;
            info!(settings = ?settings, "Generating site data");

            let tables = load_tables(&settings)?;
            let pages = pipeline::generate(&tables, &settings.category)?;
            let summary = output::emit(
                &settings.out_dir,
                &pages,
                &chrono::Utc::now(),
                settings.sitemap_url(),
            )
            .with_context(|| format!("Failed to write output to {}", settings.out_dir.display()))?;

            println!(
                "Generated {} {} providers, {} cities, {} states -> {}",
                summary.total_businesses,
                settings.category,
                summary.total_cities,
                summary.total_states,
                settings.out_dir.display()
            );
            Ok(())
        }
        Commands::Stats { overrides, limit } => {
            let settings = Settings::load(&overrides).context("Failed to load settings")?;
            let tables = load_tables(&settings)?;

            println!("{:<32} | {:>7}", "Table", "Rows");
            println!("{}", "-".repeat(42));
            for (file, rows) in tables.row_counts() {
                println!("{:<32} | {:>7}", file, rows);
            }

            let pages = pipeline::generate(&tables, &settings.category)?;
            println!();
            println!("Listings: {}", pages.business_listings.len());
            println!("Cities:   {}", pages.city_pages.len());
            println!("States:   {}", pages.state_pages.len());

            let target = settings.category.to_lowercase();
            let co_listed: Vec<(String, usize)> = pages
                .business_listings
                .iter()
                .flat_map(|l| &l.categories)
                .filter(|c| c.to_lowercase() != target)
                .cloned()
                .counts()
                .into_iter()
                .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
                .take(limit)
                .collect();
            if !co_listed.is_empty() {
                println!("\n--- Also listed under ---");
                for (name, n) in &co_listed {
                    println!("  {:<28} {:>5}", name, n);
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load_tables(settings: &Settings) -> anyhow::Result<SourceTables> {
    SourceTables::load(&settings.data_dir)
        .with_context(|| format!("Failed to load CSV data from {}", settings.data_dir.display()))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
