use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use dominant_colors::{ExtractOptions, KMeansConfig, extract_palette};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

/// Print the dominant colors of one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths (PNG, JPEG or WEBP)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to extract
    #[arg(short = 'k', long, default_value_t = dominant_colors::DEFAULT_NUM_COLORS)]
    num_colors: usize,

    /// Seed for sampling and k-means; omit for a fresh random draw
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of pixels fed to k-means
    #[arg(long, default_value_t = dominant_colors::sample::SAMPLE_CAP)]
    sample_cap: usize,

    /// Side of the square the image is resized to before sampling
    #[arg(short, long, default_value_t = dominant_colors::normalize::CANONICAL_SIZE)]
    size: u32,

    /// Number of k-means initializations
    #[arg(long, default_value_t = 10)]
    runs: usize,

    /// Iteration cap per k-means run
    #[arg(long, default_value_t = 300)]
    max_iter: usize,

    /// Emit one JSON object per file instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = ExtractOptions::default()
        .with_num_colors(args.num_colors)
        .with_sample_cap(args.sample_cap)
        .with_canonical_size(args.size)
        .with_kmeans(KMeansConfig {
            runs: args.runs,
            max_iter: args.max_iter,
            ..KMeansConfig::default()
        });
    options.seed = args.seed;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let colors = extract_palette(&bytes, &options)
            .with_context(|| format!("extracting colors from {}", input.display()))?;

        if args.json {
            println!("{}", json!({ "file": input.display().to_string(), "colors": colors }));
        } else {
            println!("{}: {}", input.display(), colors.join(" "));
        }
    }

    Ok(())
}
