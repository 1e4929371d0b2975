use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use drill_core::PlayerConfig;
use drill_core::model::Author;
use services::{
    Announcer, AppServices, Clock, PostService, RatingService, SessionLoader,
};
use ui::{App, SpeechAnnouncer, UiApp, build_app_context};

mod logging;
mod seed;

const DEFAULT_DB_URL: &str = "sqlite:drills.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCountdown { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCountdown { raw } => {
                write!(f, "invalid --countdown value: {raw} (expected whole seconds >= 1)")
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

struct DesktopApp {
    services: AppServices,
    announcer: Arc<dyn Announcer>,
}

impl UiApp for DesktopApp {
    fn current_user(&self) -> Author {
        self.services.current_user().clone()
    }

    fn player_config(&self) -> PlayerConfig {
        self.services.player_config()
    }

    fn posts(&self) -> Arc<PostService> {
        self.services.posts()
    }

    fn ratings(&self) -> Arc<RatingService> {
        self.services.ratings()
    }

    fn session_loader(&self) -> Arc<dyn SessionLoader> {
        self.services.session_loader()
    }

    fn announcer(&self) -> Arc<dyn Announcer> {
        Arc::clone(&self.announcer)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    countdown_secs: Option<u32>,
    log_filter: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--countdown <secs>] [--log <filter>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>] [--log <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --countdown 5");
    eprintln!("  --log info");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAIN_DB_URL, TRAIN_COUNTDOWN_SECS, TRAIN_LOG (RUST_LOG overrides the log filter)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

fn parse_countdown(raw: &str) -> Result<u32, ArgsError> {
    match raw.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ArgsError::InvalidCountdown {
            raw: raw.to_string(),
        }),
    }
}

impl Args {
    /// Flags override environment values, which override defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("TRAIN_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL.into()), normalize_sqlite_url);
        let mut countdown_secs = env("TRAIN_COUNTDOWN_SECS")
            .map(|value| parse_countdown(&value))
            .transpose()?;
        let mut log_filter = env("TRAIN_LOG");

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--countdown" => {
                    let value = require_value(args, "--countdown")?;
                    countdown_secs = Some(parse_countdown(&value)?);
                }
                "--log" => {
                    log_filter = Some(require_value(args, "--log")?);
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
            countdown_secs,
            log_filter,
        })
    }

    fn player_config(&self) -> PlayerConfig {
        let config = PlayerConfig::default();
        match self.countdown_secs {
            Some(secs) => config.with_countdown_secs(secs),
            None => config,
        }
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    logging::init(parsed.log_filter.as_deref());
    tracing::info!(db = %parsed.db_url, command = ?cmd, "starting");

    prepare_sqlite_file(&parsed.db_url)?;
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::system(), parsed.player_config()).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                announcer: Arc::new(SpeechAnnouncer),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Drills")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let ids = seed::seed(&services).await?;
            eprintln!("seeded {} training sessions into {}", ids.len(), parsed.db_url);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(%err, "fatal");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(ToString::to_string);
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--db", "sqlite:///tmp/a.db", "--countdown", "3", "--log", "debug"],
            &[("TRAIN_DB_URL", "sqlite:///tmp/b.db"), ("TRAIN_COUNTDOWN_SECS", "9")],
        )
        .unwrap();
        assert_eq!(args.db_url, "sqlite:///tmp/a.db");
        assert_eq!(args.countdown_secs, Some(3));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
        assert_eq!(args.player_config().countdown_secs(), 3);
    }

    #[test]
    fn environment_fills_defaults() {
        let args = parse(&[], &[("TRAIN_COUNTDOWN_SECS", "7"), ("TRAIN_LOG", "warn")]).unwrap();
        assert!(args.db_url.starts_with("sqlite://"));
        assert!(args.db_url.ends_with("drills.sqlite3"));
        assert_eq!(args.countdown_secs, Some(7));
        assert_eq!(args.log_filter.as_deref(), Some("warn"));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            parse(&["--countdown", "0"], &[]),
            Err(ArgsError::InvalidCountdown { raw: "0".into() })
        );
        assert_eq!(
            parse(&["--db"], &[]),
            Err(ArgsError::MissingValue { flag: "--db" })
        );
        assert_eq!(
            parse(&["--verbose"], &[]),
            Err(ArgsError::UnknownArg("--verbose".into()))
        );
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite:///x/y.db".into()), "sqlite:///x/y.db");
        let url = normalize_sqlite_url("sqlite:data/dev.db".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/dev.db"), "{url}");
    }
}
