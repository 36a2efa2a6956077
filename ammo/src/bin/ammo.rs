//! Ammunition generation tool.
//!
//! Reads an ammo configuration, synthesizes the request stream and writes
//! it to stdout. Diagnostics go to stderr so the stream stays clean.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;

use ammo::config;
use ammo_payload::AmmoGenerator;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the ammo config file
    #[clap(short, long)]
    config_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish()
        .init();

    let args = Args::parse();
    let config = config::load(&args.config_path).with_context(|| {
        format!(
            "could not load configuration from {}",
            args.config_path.display()
        )
    })?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::from_seed(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator = AmmoGenerator::new(&config)?;
    info!(total = generator.total_requests(), "starting emission");

    // Lock stdout once and buffer aggressively; a run emits one small
    // record per simulated request.
    let stdout = std::io::stdout();
    let mut out = BufWriter::with_capacity(10_000_000, stdout.lock());
    generator.run(&mut rng, &mut out)?;
    out.flush()?;
    Ok(())
}
