mod app;
mod colors;
mod config;
mod help;
mod settings;
mod terminal;

use clap::Parser;
use config::{AppConfig, CliOverrides};
use pascalart::mode::{FractalPredicate, ViewMode};
use settings::Settings;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pascalart")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal-based Pascal's triangle: identities, fractals and animations", long_about = None)]
struct Cli {
    /// View mode: sum, hockey, fibonacci, binomial, fractal, prime
    #[arg(short, long)]
    mode: Option<ViewMode>,

    /// Rows in the base triangle (2-64)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Seconds between Fibonacci reveal steps (0.2-1.0)
    #[arg(short, long)]
    speed: Option<f32>,

    /// Fractal coloring: odd, even, 2, 3, 4, 5
    #[arg(short = 'f', long)]
    fractal_predicate: Option<FractalPredicate>,

    /// Row checked in prime mode
    #[arg(short, long)]
    prime_row: Option<usize>,

    /// Row expanded in binomial mode
    #[arg(short, long)]
    binomial_row: Option<usize>,

    /// Hockey-stick start column
    #[arg(short = 'c', long)]
    start_col: Option<usize>,

    /// Hockey-stick run length
    #[arg(short = 'L', long)]
    length: Option<usize>,

    /// Print one frame to stdout (no interactive display)
    #[arg(long)]
    print: bool,

    /// Config file (default: <config dir>/pascalart/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PASCALART_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> io::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref());
    let overrides = CliOverrides {
        mode: cli.mode,
        rows: cli.rows,
        speed: cli.speed,
        fractal_predicate: cli.fractal_predicate,
        prime_row: cli.prime_row,
        binomial_row: cli.binomial_row,
        start_col: cli.start_col,
        length: cli.length,
    };

    let config = AppConfig::resolve(overrides, &settings, cli.print)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    tracing::debug!(rows = config.rows, mode = ?config.mode, "starting");

    app::run(config)
}
