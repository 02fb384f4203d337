use std::fmt;
use std::io::Write;

use quest_core::model::{SubLevelId, count_levels_passed};
use quest_core::routes::TOPICS;
use quest_core::quiz::ChoiceLabel;
use services::{AppServices, Clock, ProgressStoreError, QuizServiceError, QuizStep};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidSubLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSubLevel { raw } => write!(f, "invalid sub-level id: {raw:?}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options] home");
    eprintln!("  cargo run -p app -- [options] levels");
    eprintln!("  cargo run -p app -- [options] play <sub-level-id>");
    eprintln!("  cargo run -p app -- [options] word");
    eprintln!("  cargo run -p app -- [options] avatar [<id>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   default: sqlite://engliquest.sqlite3");
    eprintln!("  --log <filter>      default: warn");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ENGLIQUEST_DB_URL, ENGLIQUEST_LOG, ENGLIQUEST_WORD_URL");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Home,
    Levels,
    Play(SubLevelId),
    Word,
    Avatar(Option<String>),
}

#[derive(Debug)]
struct Args {
    db_url: String,
    log: String,
    command: Command,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ENGLIQUEST_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://engliquest.sqlite3".into(), normalize_sqlite_url);
        let mut log = std::env::var("ENGLIQUEST_LOG").unwrap_or_else(|_| "warn".into());
        let mut positional = Vec::new();

        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--log" => log = require_value(&mut args, "--log")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("home") => Command::Home,
            Some("levels") => Command::Levels,
            Some("play") => {
                let raw = positional
                    .next()
                    .ok_or(ArgsError::MissingValue { flag: "play" })?;
                let id = SubLevelId::new(raw.clone())
                    .map_err(|_| ArgsError::InvalidSubLevel { raw })?;
                Command::Play(id)
            }
            Some("word") => Command::Word,
            Some("avatar") => Command::Avatar(positional.next()),
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };
        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self {
            db_url,
            log,
            command,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn with_create_mode(db_url: &str) -> String {
    if db_url == "sqlite::memory:" || db_url.contains("mode=") {
        return db_url.to_owned();
    }
    let sep = if db_url.contains('?') { '&' } else { '?' };
    format!("{db_url}{sep}mode=rwc")
}

async fn print_home(app: &AppServices) {
    let avatar = app.preferences().load_avatar().await;
    let state = app.progress().load().await;
    let catalog = app.catalog();
    let passed = count_levels_passed(catalog.levels(), &state);

    println!(
        "EngliQuest  [avatar: {}]",
        avatar.as_ref().map_or("default", |a| a.id())
    );
    println!("Levels passed: {passed}/{}", catalog.levels().len());
    println!();
    for topic in TOPICS {
        println!("  {:<24} {}", topic.title, topic.description);
    }
}

async fn print_levels(app: &AppServices) {
    let overview = app.progress().overview(&app.catalog()).await;
    for level in overview {
        let lock = if level.unlocked { " " } else { "🔒" };
        let done = if level.passed { " (passed)" } else { "" };
        println!("{lock} Level {}: {}{done}", level.ordinal, level.title);
        println!("    {}", level.description);
        for sub in level.sub_levels {
            let lock = if sub.unlocked { " " } else { "🔒" };
            let best = sub
                .best_score
                .map(|score| format!(" best {score}"))
                .unwrap_or_default();
            println!(
                "    {lock} {}.{} {:<10} [{}]{best}  ({})",
                level.ordinal, sub.number, sub.title, sub.badge, sub.id
            );
        }
    }
}

async fn read_choice(lines: &mut Lines<BufReader<Stdin>>) -> std::io::Result<Option<usize>> {
    loop {
        print!("Your answer (A-D): ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        if let Some(label) = ChoiceLabel::parse(&line) {
            return Ok(Some(label.index()));
        }
        println!("Please type A, B, C or D.");
    }
}

async fn play(app: &AppServices, sub_level: &SubLevelId) -> Result<(), Box<dyn std::error::Error>> {
    let quiz_service = app.quiz();
    let mut quiz = quiz_service.start(sub_level).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(question) = quiz.session().current().cloned() else {
            break;
        };
        println!();
        if let Some(context) = question.context() {
            println!("  \"{context}\"");
        }
        println!("{}", question.prompt());
        for (label, choice) in question.labeled_choices() {
            println!("  {label}. {choice}");
        }

        let Some(choice) = read_choice(&mut lines).await? else {
            println!("\nQuiz abandoned; nothing was recorded.");
            return Ok(());
        };
        let feedback = quiz_service.select(&mut quiz, choice)?;
        if feedback.correct {
            println!("Correct! +{} points", feedback.awarded);
        } else {
            let label = ChoiceLabel::from_index(feedback.correct_index)
                .map_or_else(String::new, |l| l.to_string());
            println!("Incorrect. The answer was {label}.");
        }

        match quiz_service.advance(&mut quiz).await {
            Ok(QuizStep::Next { .. }) => {}
            Ok(QuizStep::Finished(outcome)) => {
                println!();
                println!(
                    "Finished: {}/{} ({}%), best {}",
                    outcome.score, outcome.max_score, outcome.percentage, outcome.best
                );
                if outcome.level_passed {
                    println!("Level complete! The next level is now unlocked.");
                } else if outcome.passed {
                    println!("Passed! The next sub-level is now unlocked.");
                } else {
                    println!("Score 70% or more to unlock the next sub-level.");
                }
            }
            Err(QuizServiceError::Progress(ProgressStoreError::Persist(err))) => {
                tracing::warn!(error = %err, "progress not saved");
                println!("Finished, but your progress could not be saved: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let db_url = with_create_mode(&args.db_url);
    tracing::debug!(db = %db_url, "opening database");
    let app = AppServices::new_sqlite(&db_url, Clock::system()).await?;

    match args.command {
        Command::Home => print_home(&app).await,
        Command::Levels => print_levels(&app).await,
        Command::Play(sub_level) => play(&app, &sub_level).await?,
        Command::Word => {
            let word = app.word_of_the_day().today().await;
            println!("Word of the day: {}", word.word);
            println!("{}", word.definition);
        }
        Command::Avatar(None) => match app.preferences().load_avatar().await {
            Some(avatar) => println!("{}", avatar.id()),
            None => println!("(no avatar selected)"),
        },
        Command::Avatar(Some(id)) => {
            let avatar = app.preferences().save_avatar(&id).await?;
            println!("avatar set to {}", avatar.id());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn defaults_to_home() {
        assert_eq!(parse(&[]).unwrap().command, Command::Home);
    }

    #[test]
    fn play_requires_a_sub_level() {
        assert!(matches!(
            parse(&["play"]).unwrap_err(),
            ArgsError::MissingValue { flag: "play" }
        ));
        let args = parse(&["--db", "sqlite::memory:", "play", "easy-1"]).unwrap();
        assert_eq!(args.command, Command::Play(SubLevelId::new("easy-1").unwrap()));
        assert_eq!(args.db_url, "sqlite::memory:");
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(matches!(
            parse(&["dance"]).unwrap_err(),
            ArgsError::UnknownCommand(_)
        ));
        assert!(matches!(
            parse(&["--fast"]).unwrap_err(),
            ArgsError::UnknownArg(_)
        ));
        assert!(matches!(
            parse(&["levels", "extra"]).unwrap_err(),
            ArgsError::UnknownArg(_)
        ));
    }

    #[test]
    fn create_mode_is_added_once() {
        assert_eq!(with_create_mode("sqlite:///tmp/a.db"), "sqlite:///tmp/a.db?mode=rwc");
        assert_eq!(with_create_mode("sqlite:///tmp/a.db?mode=ro"), "sqlite:///tmp/a.db?mode=ro");
        assert_eq!(with_create_mode("sqlite::memory:"), "sqlite::memory:");
    }
}
