// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::scraper::{extract_plant_names, scrape_images_from_pdf, DuckDuckGoImages};

/// Herb image scraper CLI
#[derive(Parser, Debug)]
#[command(name = "herb-scraper")]
#[command(version)]
#[command(about = "Harvest one illustration per plant name from a PDF dictionary", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract plant names and download one image per name
    Scrape(ScrapeArgs),

    /// List the plant names that would be scraped
    Names(NamesArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Source PDF listing one plant per line
    #[arg(long)]
    pub pdf: PathBuf,

    /// Output directory for downloaded images
    #[arg(long, default_value = "./AyurHerbs")]
    pub out: PathBuf,

    /// Stop after this many names
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Source PDF listing one plant per line
    #[arg(long)]
    pub pdf: PathBuf,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scrape(args) => scrape(args).await,
        Commands::Names(args) => names(args).await,
    }
}

async fn scrape(args: ScrapeArgs) -> Result<()> {
    let provider = DuckDuckGoImages::new()?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let report =
        scrape_images_from_pdf(&provider, &client, &args.pdf, &args.out, args.limit).await?;

    println!(
        "Scraped {} names: {} downloaded, {} without an image, {} failed",
        report.names, report.downloaded, report.skipped_no_image, report.failed
    );
    Ok(())
}

async fn names(args: NamesArgs) -> Result<()> {
    let names = extract_plant_names(&args.pdf)?;
    for name in &names {
        println!("{}", name);
    }
    println!("({} names)", names.len());
    Ok(())
}
