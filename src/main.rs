//! Command line front end for the Game of Life board

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use life_board::{
    build_simulation,
    config::{BoundaryCondition, CliOverrides, Settings},
    game_of_life::{create_example_grids, load_grid_from_file, load_grids_from_directory, GameOfLifeRules, Grid},
    simulation::StabilityAnalysis,
    utils::{ColorOutput, GridFormatter},
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_board")]
#[command(about = "Conway's Game of Life on a bounded or toroidal board")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pattern until it settles or the generation limit is hit
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Animate a pattern in the terminal, one generation per tick
    Play {
        #[command(flatten)]
        board: BoardArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Classify how a pattern evolves
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations to evolve (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Pattern file (overrides config)
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Number of generations (overrides config)
    #[arg(short, long)]
    generations: Option<usize>,

    /// Board width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Board height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Wrap coordinates around the board edges
    #[arg(long, conflicts_with = "bounded")]
    wrap: bool,

    /// Treat cells beyond the board edges as dead
    #[arg(long)]
    bounded: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BoardArgs {
    fn overrides(&self) -> CliOverrides {
        let wrap = match (self.wrap, self.bounded) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CliOverrides {
            generations: self.generations,
            width: self.width,
            height: self.height,
            wrap,
            pattern_file: self.pattern.clone(),
            output_dir: self.output.clone(),
        }
    }

    /// Load the config file (or defaults), apply overrides and validate
    fn settings(&self) -> Result<Settings> {
        let mut settings = load_settings(&self.config)?;
        settings.merge_with_cli(&self.overrides());
        settings.validate().context("Configuration validation failed")?;
        Ok(settings)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { board, show_evolution, verbose } => run_command(board, show_evolution, verbose),
        Commands::Play { board, interval } => play_command(board, interval),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze { config, pattern, generations } => analyze_command(config, pattern, generations),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// Render an error with its full context chain, one cause per line
fn format_error(err: &anyhow::Error) -> String {
    let mut message = format!("❌ {}", err);
    for cause in err.chain().skip(1) {
        message.push_str(&format!("\n   caused by: {}", cause));
    }
    ColorOutput::error(&message)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::parse_file(config_path)
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn run_command(board: BoardArgs, show_evolution: bool, verbose: bool) -> Result<()> {
    let settings = board.settings()?;

    if verbose {
        println!("Configuration:");
        println!("  Board: {}x{} ({:?})", settings.board.width, settings.board.height, settings.board.boundary_condition);
        println!("  Generations: {}", settings.playback.generations);
        println!("  Stop when settled: {}", settings.playback.stop_when_settled);
        if let Some(ref pattern) = settings.input.pattern_file {
            println!("  Pattern: {}", pattern.display());
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let mut simulation = build_simulation(&settings)?;

    if show_evolution {
        println!("Generation 0:");
        println!("{}", GridFormatter::format_grid_compact(simulation.grid()));
    }

    let start_time = Instant::now();
    let summary = simulation.run_observed(
        settings.playback.generations,
        settings.playback.stop_when_settled,
        |report, grid| {
            if show_evolution {
                println!("Generation {} (changed {}):", report.generation, report.changed);
                println!("{}", GridFormatter::format_grid_compact(grid));
            }
        },
    );

    println!("{}", ColorOutput::success(&format!(
        "✅ Ran {} generation(s) in {:.3}s",
        summary.generations_run,
        start_time.elapsed().as_secs_f64()
    )));
    println!("\n{}", GridFormatter::format_run_summary(&summary, verbose));

    let path = GridFormatter::save_run(&summary, &settings.output.output_directory, settings.output.format)
        .context("Failed to save run report")?;
    println!("{}", ColorOutput::info(&format!("Run report saved to {}", path.display())));

    Ok(())
}

fn play_command(board: BoardArgs, interval: Option<u64>) -> Result<()> {
    let settings = board.settings()?;
    let tick = Duration::from_millis(interval.unwrap_or(settings.playback.tick_interval_ms));
    let mut simulation = build_simulation(&settings)?;

    draw_frame(simulation.generation(), simulation.grid());
    let summary = simulation.run_observed(
        settings.playback.generations,
        settings.playback.stop_when_settled,
        |report, grid| {
            std::thread::sleep(tick);
            debug!(?report, "tick");
            draw_frame(report.generation, grid);
        },
    );

    println!("{}", ColorOutput::success(&format!(
        "{} after {} generation(s), {} living cell(s)",
        GridFormatter::describe_stop_reason(&summary.stop_reason),
        summary.generations_run,
        summary.final_living
    )));

    Ok(())
}

fn draw_frame(generation: u64, grid: &Grid) {
    // Clear screen and home the cursor
    print!("\x1b[2J\x1b[H");
    println!("Generation {}", generation);
    println!("{}", GridFormatter::format_grid_with_coords(grid));
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/patterns");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut bounded = Settings::default();
    bounded.board.width = 10;
    bounded.board.height = 10;
    bounded.board.boundary_condition = BoundaryCondition::Dead;
    bounded.input.pattern_file = Some(PathBuf::from("input/patterns/blinker.txt"));
    bounded.to_file(&examples_dir.join("bounded.yaml"))?;

    let mut torus = Settings::default();
    torus.playback.generations = 100;
    torus.playback.stop_when_settled = false;
    torus.input.pattern_file = Some(PathBuf::from("input/patterns/glider.txt"));
    torus.to_file(&examples_dir.join("torus.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/examples/torus.yaml");

    Ok(())
}

fn analyze_command(config_path: PathBuf, pattern_path: PathBuf, generations: Option<usize>) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing patterns..."));

    let settings = load_settings(&config_path)?;
    let generations = generations.unwrap_or(settings.playback.generations);
    let boundary = settings.board.boundary_condition;

    let patterns = if pattern_path.is_dir() {
        load_grids_from_directory(&pattern_path, boundary)?
    } else {
        let pattern = load_grid_from_file(&pattern_path, boundary)
            .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;
        vec![(pattern_path.display().to_string(), pattern)]
    };

    for (name, pattern) in patterns {
        println!("\n{}", ColorOutput::info(&format!("{} ({}x{}):", name, pattern.width(), pattern.height())));
        println!("{}", GridFormatter::format_grid_with_coords(&pattern));
        println!("Living cells: {}", pattern.living_count());
        println!(
            "Density: {:.1}%",
            pattern.living_count() as f64 / pattern.len() as f64 * 100.0
        );

        let analysis = StabilityAnalysis::analyze(&evolution_path(pattern, generations));
        println!("{}", GridFormatter::format_analysis(&analysis));
    }

    Ok(())
}

/// The pattern followed by each of its next `generations` states
fn evolution_path(pattern: Grid, generations: usize) -> Vec<Grid> {
    let mut path = Vec::new();
    let mut current = pattern;
    for _ in 0..generations {
        let next = GameOfLifeRules::evolve(&current);
        path.push(current);
        current = next;
    }
    path.push(current);
    path
}
