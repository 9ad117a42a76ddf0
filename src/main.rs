//! Video Event Log - Binary Entry Point
//!
//! This is the main entry point for the event-logger binary.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use video_event_log::shell::SessionShell;
use video_event_log::{LogResult, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "event-logger", version)]
#[command(about = "Timestamped key-press log for annotating video", long_about = None)]
struct Cli {
    /// Log file (default: EVENT_LOG_PATH or ./events.csv)
    #[arg(long, global = true, conflicts_with = "video")]
    log: Option<PathBuf>,

    /// Video being annotated; the log is <video>.csv next to it
    #[arg(long, global = true)]
    video: Option<PathBuf>,

    /// Video start time added to every position (HH:MM:SS, MM:SS or SS)
    #[arg(long, global = true)]
    start: Option<String>,

    /// Maximum undo history kept in a session
    #[arg(long, global = true)]
    undo_depth: Option<usize>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a key at a playback position (ms) and re-sort
    Record { key: char, position_ms: u64 },
    /// Re-sort the log by timestamp
    Sort,
    /// Print the log
    Show,
    /// Print line numbers containing a term (any case)
    Search { term: String },
    /// Delete a line (1-based), or the last line
    Delete {
        #[arg(long)]
        line: Option<usize>,
    },
    /// Empty the log
    Clear {
        /// Confirm clearing; nothing happens without it
        #[arg(long)]
        yes: bool,
    },
    /// Copy the log verbatim
    Export { dest: Option<PathBuf> },
    /// Per-key counts and time span
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Interactive session on stdin/stdout with undo/redo
    Session,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::from_env();

        if let Some(video) = &self.video {
            let env_offset = config.start_offset;
            config = SessionConfig::for_video(video).with_undo_depth(config.undo_depth);
            config.start_offset = env_offset;
        } else if let Some(log) = &self.log {
            config.log_path = log.clone();
        }
        if let Some(start) = &self.start {
            config = config.with_start(start);
        }
        if let Some(depth) = self.undo_depth {
            config.undo_depth = depth;
        }

        config
    }
}

fn run(cli: Cli) -> LogResult<()> {
    let config = cli.session_config();
    let mut session = Session::open(&config)?;

    match cli.command {
        Commands::Record { key, position_ms } => {
            let highlight = session.record_key(key, position_ms)?;
            if let Some(line) = highlight.line() {
                println!("recorded at line {}", line);
            }
        }
        Commands::Sort => session.sort()?,
        Commands::Show => {
            for line in session.lines()? {
                println!("{}", line);
            }
        }
        Commands::Search { term } => {
            let lines = session.store().search(&term)?;
            if lines.is_empty() {
                println!("No entries found containing: {}", term);
            }
            for number in lines {
                println!("{}", number);
            }
        }
        Commands::Delete { line } => {
            if let Some(line) = line {
                session.select_line(line)?;
            }
            session.delete_entry()?;
        }
        Commands::Clear { yes: false } => {
            eprintln!("Refusing to clear without --yes. This cannot be undone.");
        }
        Commands::Clear { yes: true } => session.clear()?,
        Commands::Export { dest } => {
            let dest = dest.unwrap_or_else(|| session.suggested_export_name().into());
            let bytes = session.export_to(&dest)?;
            println!("exported {} bytes to {}", bytes, dest.display());
        }
        Commands::Stats { json } => {
            let stats = session.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", stats.report());
            }
        }
        Commands::Session => {
            let mut shell =
                SessionShell::new(session, io::stdin().lock(), BufWriter::new(io::stdout()));
            shell.run()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
