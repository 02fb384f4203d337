use std::fmt;

use quest_core::model::{LevelCatalog, ProgressState};
use quest_core::time::Clock;
use storage::repository::{PROGRESS_KEY, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    passed: usize,
    score: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPassed { raw: String },
    InvalidScore { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPassed { raw } => write!(f, "invalid --passed value: {raw}"),
            ArgsError::InvalidScore { raw } => {
                write!(f, "invalid --score value (expected 0-100): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ENGLIQUEST_DB_URL")
            .unwrap_or_else(|_| "sqlite:engliquest.sqlite3?mode=rwc".into());
        let mut passed = 3;
        let mut score = 80;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--passed" => {
                    let value = require_value(&mut args, "--passed")?;
                    passed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPassed { raw: value.clone() })?;
                }
                "--score" => {
                    let value = require_value(&mut args, "--score")?;
                    score = value
                        .parse::<u32>()
                        .ok()
                        .filter(|s| *s <= 100)
                        .ok_or_else(|| ArgsError::InvalidScore { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            passed,
            score,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:engliquest.sqlite3?mode=rwc)");
    eprintln!("  --passed <n>        Number of sub-levels to mark as played, in unlock order (default: 3)");
    eprintln!("  --score <0-100>     Score recorded for each of them (default: 80)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let catalog = LevelCatalog::vocabulary();
    let clock = Clock::system();

    let mut state = ProgressState::new();
    let subs = catalog
        .levels()
        .iter()
        .flat_map(|level| level.sub_levels())
        .take(args.passed);
    for sub in subs {
        state.record_attempt(sub.id(), args.score, clock.now())?;
    }

    let blob = serde_json::to_string(&state)?;
    storage.kv.set(PROGRESS_KEY, &blob).await?;

    println!(
        "seeded {} sub-levels at score {} into {}",
        state.len(),
        args.score,
        args.db_url
    );
    Ok(())
}
