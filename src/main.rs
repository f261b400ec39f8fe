mod app;
mod color;
mod data;
#[cfg(target_os = "linux")]
mod measure;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;

use app::SeekScopeApp;
use state::AppState;

#[derive(Parser)]
#[command(name = "seekscope")]
#[command(about = "HDD seek-time profiler and scatter-plot viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample random reads on a block device, emitting distance/time CSV.
    Measure {
        /// Block device (or regular file) to sample, e.g. /dev/sda
        device: PathBuf,

        /// Number of timed reads
        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Bytes per read (positive multiple of 512)
        #[arg(long, default_value_t = 4096)]
        block_size: usize,

        /// RNG seed for a reproducible offset sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Read through the page cache instead of O_DIRECT
        #[arg(long)]
        no_direct: bool,

        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Open the interactive scatter-plot viewer (the default).
    View {
        /// Measurement file to load on startup (CSV or JSON)
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Commands::Measure {
            device,
            samples,
            block_size,
            seed,
            no_direct,
            out,
        }) => run_measure(device, samples, block_size, seed, !no_direct, out),
        Some(Commands::View { file }) => run_viewer(file),
        None => run_viewer(None),
    }
}

#[cfg(target_os = "linux")]
fn run_measure(
    device: PathBuf,
    samples: usize,
    block_size: usize,
    seed: Option<u64>,
    direct: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = measure::MeasureConfig {
        device,
        samples,
        block_size,
        seed,
        direct,
    };
    match out {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            measure::run(&config, file)?;
        }
        None => {
            measure::run(&config, std::io::stdout().lock())?;
        }
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run_measure(
    _device: PathBuf,
    _samples: usize,
    _block_size: usize,
    _seed: Option<u64>,
    _direct: bool,
    _out: Option<PathBuf>,
) -> Result<()> {
    anyhow::bail!("the measure command needs O_DIRECT block access and is only supported on Linux")
}

fn run_viewer(file: Option<PathBuf>) -> Result<()> {
    let mut state = AppState::default();
    if let Some(path) = &file {
        let dataset = data::loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} seek samples from {}",
            dataset.len(),
            path.display()
        );
        state.set_dataset(dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SeekScope – HDD seek profiler",
        options,
        Box::new(move |_cc| Ok(Box::new(SeekScopeApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
