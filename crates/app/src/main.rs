mod logging;
mod terminal;

use std::fmt;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use joi_core::catalog::Catalog;
use joi_core::model::Language;
use services::{AppServices, Clock, Route};

use crate::terminal::{CheckinOutcome, Terminal, TerminalNavigator};

#[derive(Debug)]
enum SetupError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Periodic wellness check-in from the terminal.
#[derive(Debug, Parser)]
#[command(name = "joi", version)]
struct Cli {
    /// SQLite database URL or file path
    #[arg(
        long,
        env = "JOI_DB_URL",
        default_value = "sqlite://joi.sqlite3",
        global = true
    )]
    db: String,

    /// Directory of `{code}.json` translation files; the stored language picks the file
    #[arg(long, env = "JOI_LOCALE_DIR", global = true)]
    locale_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Answer four random questions (default)
    Checkin,
    /// Show when the last check-in was completed
    Status,
    /// Run the first-launch walkthrough again
    Onboard,
    /// Clear the onboarding flags
    Reset,
    /// Store the preferred language (en, ko)
    Language { code: Language },
}

fn normalize_sqlite_url(raw: &str) -> Result<String, SetupError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SetupError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| SetupError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(SetupError::InvalidDbUrl {
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
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let db_url = normalize_sqlite_url(&cli.db)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    log::debug!("opening {db_url}");
    let app =
        AppServices::new_sqlite(&db_url, Clock::default_clock(), Catalog::standard()).await?;

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());
    let navigator = TerminalNavigator::default();

    match cli.command.unwrap_or(Command::Checkin) {
        Command::Checkin => {
            if app.landing().entry_route().await? == Route::Landing {
                let flow = app.begin_onboarding().await?;
                if term.run_onboarding(flow, &navigator).await?.is_none() {
                    return Ok(());
                }
            }
            // Read after onboarding so a language picked just now applies.
            let localization = app.localization(cli.locale_dir.as_deref()).await?;
            let checkin = app.checkin().with_catalog(localization.catalog());
            let session = checkin.start_session()?;
            match term
                .run_checkin(&checkin, session, localization.text(), &navigator)
                .await?
            {
                CheckinOutcome::Completed(_) => {
                    if navigator.current() == Some(Route::Dashboard) {
                        term.show_dashboard(&app.dashboard().snapshot().await?)?;
                    }
                }
                CheckinOutcome::Abandoned => log::info!("check-in abandoned"),
            }
        }
        Command::Status => {
            term.show_dashboard(&app.dashboard().snapshot().await?)?;
        }
        Command::Onboard => {
            app.landing().start_onboarding().await?;
            let flow = app.begin_onboarding().await?;
            term.run_onboarding(flow, &navigator).await?;
        }
        Command::Reset => {
            app.preferences().reset_onboarding().await?;
            println!("Onboarding flags cleared.");
        }
        Command::Language { code } => {
            app.preferences().set_language(code).await?;
            println!("Language set to {}.", code.label());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
