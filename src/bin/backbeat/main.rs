//! backbeat - drum practice in the terminal
//!
//! Run with: cargo run -- --exercise level-1-ex-3

mod app;
mod audio;
mod ui;

use std::{fs::File, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use app::{App, Selection};
use backbeat::{config::EngineConfig, exercise::ExerciseCatalog, sequencing::Catalog};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drum practice in the terminal", long_about = None)]
struct Cli {
    /// Exercise to start on
    #[arg(short, long, conflicts_with = "pattern")]
    exercise: Option<String>,

    /// Play a single pattern instead of an exercise
    #[arg(short, long)]
    pattern: Option<String>,

    /// Tempo override
    #[arg(short, long)]
    bpm: Option<f64>,

    /// Score a pattern on rhythm only
    #[arg(long, requires = "pattern")]
    timing: bool,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra pattern catalog (TOML, `[[pattern]]` tables)
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Print the exercises and patterns and exit
    #[arg(long)]
    list: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("backbeat")
        .join("backbeat.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("backbeat.log")));

    match log_file {
        Ok(file) => {
            let _ = WriteLogger::init(log_level, Config::default(), file);
        }
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    log::info!("backbeat starting (log level: {log_level:?})");
}

fn print_catalogs(exercises: &ExerciseCatalog, patterns: &Catalog) {
    for level in exercises.levels() {
        println!("{}  (unlock: {} stars)", level.name, level.unlock_stars);
        for id in &level.exercise_ids {
            if let Some(exercise) = exercises.get(id) {
                println!(
                    "  {:<14} {:<28} {:?}, {} BPM",
                    exercise.id, exercise.title, exercise.kind, exercise.tempo_bpm
                );
            }
        }
    }

    println!();
    println!("Patterns");
    for pattern in patterns.iter() {
        println!(
            "  {:<22} {:<44} {:?}, {} BPM",
            pattern.id(),
            pattern.name(),
            pattern.difficulty(),
            pattern.default_tempo_bpm()
        );
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let patterns = match &cli.patterns {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            Catalog::from_toml_str(&source).wrap_err("invalid pattern catalog")?
        }
        None => Catalog::builtin().clone(),
    };
    let exercises = ExerciseCatalog::builtin();

    if cli.list {
        print_catalogs(exercises, &patterns);
        return Ok(());
    }

    let selection = match (cli.pattern, cli.exercise) {
        (Some(id), _) => Selection::Pattern { id, timing: cli.timing },
        (None, id) => Selection::Exercise {
            id: id.unwrap_or_else(|| "level-1-ex-1".to_string()),
        },
    };

    App::new(selection, cli.bpm, &patterns, exercises, config)?.run()
}
