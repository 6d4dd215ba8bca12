//! Command line driver for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life_sim::{
    build_session,
    config::{BorderPolicy, CliOverrides, Settings},
    game_of_life::{create_example_patterns, save_snapshot, AutomatonGrid, Pattern},
    report::{RunRecorder, RunReport},
    utils::{ColorOutput, GridFormatter},
    InputEvent,
};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Conway's Game of Life on a fixed-size grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a grid and run it for a number of generations
    Run(RunArgs),

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a pattern and its first few generations
    Show {
        /// Pattern file or built-in pattern name
        pattern: String,

        /// Generations to print after the initial state
        #[arg(short, long, default_value_t = 4)]
        generations: u64,

        /// Dead cells around the pattern
        #[arg(short, long, default_value_t = 2)]
        margin: usize,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Pattern file to seed the grid with (overrides config)
    #[arg(short, long, conflicts_with = "name")]
    pattern: Option<PathBuf>,

    /// Built-in pattern to seed the grid with (overrides config)
    #[arg(short, long)]
    name: Option<String>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long, value_enum)]
    border: Option<BorderPolicy>,

    /// Number of generations to run (overrides config)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Step on a wall-clock interval in milliseconds
    #[arg(long, conflicts_with = "frames_per_step")]
    interval_ms: Option<u64>,

    /// Step once every N frames
    #[arg(long)]
    frames_per_step: Option<u32>,

    /// Step as fast as possible, ignoring the cadence
    #[arg(long)]
    fast: bool,

    /// Stop early once the grid is extinct, still or oscillating
    #[arg(long)]
    stop_when_settled: bool,

    /// Write a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the final generation as a pattern file here
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => run_command(args).map(|_| ()),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show {
            pattern,
            generations,
            margin,
        } => show_command(&pattern, generations, margin),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(args: RunArgs) -> Result<RunReport> {
    let mut settings = load_settings(&args.config)?;

    let cli_overrides = CliOverrides {
        width: args.width,
        height: args.height,
        border_policy: args.border,
        interval_ms: args.interval_ms,
        frames_per_step: args.frames_per_step,
        generations: args.generations,
        pattern_file: args.pattern.clone(),
        pattern_name: args.name.clone(),
        report_file: args.report.clone(),
        snapshot_file: args.snapshot.clone(),
    };
    settings.merge_with_cli(&cli_overrides);
    if args.stop_when_settled {
        settings.run.stop_when_settled = true;
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let mut session = build_session(&settings).context("Failed to seed the grid")?;
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running {}x{} grid for {} generations ({} living cells, {})",
            settings.grid.width,
            settings.grid.height,
            settings.run.generations,
            session.grid().live_cell_count(),
            if args.fast {
                "fast".to_string()
            } else {
                session.cadence().to_string()
            }
        ))
    );

    let frame_time = Duration::from_secs_f64(1.0 / settings.display.frame_rate as f64);
    let mut recorder = RunRecorder::new(session.grid());

    if !args.fast {
        session.handle(InputEvent::TogglePause);
    }

    while recorder.generations_recorded() < settings.run.generations {
        let now = Instant::now();
        let outcome = if args.fast {
            session.step_now(now)
        } else {
            session.frame(now)
        };

        if outcome.stepped {
            recorder.record(session.grid());
            if settings.run.stop_when_settled && recorder.stability().is_settled() {
                info!(
                    generation = outcome.generation,
                    stability = %recorder.stability(),
                    "run settled"
                );
                break;
            }
        }

        if !args.fast {
            thread::sleep(frame_time);
        }
    }

    let report = recorder.finish(session.grid());

    println!("\n{}", GridFormatter::format_around_life(session.grid(), 80, 40));
    println!("{}", report);
    if !report.live_history.is_empty() {
        println!("  History: {}", GridFormatter::format_history(&report));
    }

    if let Some(ref path) = settings.output.report_file {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("Report saved to {}", path.display())));
    }
    if let Some(ref path) = settings.output.snapshot_file {
        save_snapshot(session.grid(), path)?;
        println!("{}", ColorOutput::success(&format!("Snapshot saved to {}", path.display())));
    }

    Ok(report)
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut glider = Settings::default();
    glider.grid.width = 64;
    glider.grid.height = 64;
    glider.input.pattern_name = Some("glider".to_string());
    glider.cadence.interval_ms = 200;
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    let mut frames = Settings::default();
    frames.cadence.mode = game_of_life_sim::config::CadenceMode::FrameCount;
    frames.grid.border_policy = BorderPolicy::Wrap;
    frames.input.pattern_name = Some("r-pentomino".to_string());
    frames.run.stop_when_settled = true;
    frames.to_file(&examples_dir.join("r_pentomino.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: cargo run -- run --config config/examples/glider.yaml");

    Ok(())
}

fn show_command(pattern: &str, generations: u64, margin: usize) -> Result<()> {
    let path = PathBuf::from(pattern);
    let parsed = if path.exists() {
        Pattern::load(&path)
    } else {
        Pattern::named(pattern)
    }
    .with_context(|| format!("Failed to load pattern {}", pattern))?;

    let mut grid =
        AutomatonGrid::new(parsed.width + 2 * margin, parsed.height + 2 * margin);
    parsed.place(&mut grid, margin as i64, margin as i64);

    for _ in 0..=generations {
        println!(
            "Generation {} (Living: {}):",
            grid.generation(),
            grid.live_cell_count()
        );
        println!("{}", GridFormatter::format_grid_with_coords(&grid));
        grid.step();
    }

    Ok(())
}
