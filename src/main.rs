// algotty: step-by-step terminal animations of classic algorithms

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use algotty::config::{Args, SessionConfig};
use algotty::session::{RunOutput, Session};
use algotty::ui::App;

const DEFAULT_LOG_FILTER: &str = "algotty=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.headless {
        init_logging_stderr();
    } else if let Some(path) = &args.log_file {
        init_logging_file(path)?;
    }

    let config = SessionConfig::from(&args);
    let mut session = Session::new(config);

    if args.headless {
        return run_headless(&mut session);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_logging_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// The TUI owns the terminal, so logs only ever go to a file
fn init_logging_file(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Run once in real time, logging progress, then print a summary
fn run_headless(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let algorithm = session.algorithm_name();
    let output = session.run_live();

    if let Some(err) = session.last_error() {
        return Err(format!("{} failed: {}", algorithm, err).into());
    }

    let stats = session.stats();
    println!("{}", algorithm);
    match output {
        Some(RunOutput::Sorted(values)) => println!("sorted:  {:?}", values),
        Some(RunOutput::Traversed(values)) => println!("visited: {:?}", values),
        Some(RunOutput::Searched(vertices)) => println!("visited: {:?}", vertices),
        None => println!("(nothing to run)"),
    }
    println!(
        "comparisons: {}  swaps: {}  visits: {}  time: {} ms",
        stats.comparisons(),
        stats.mutations(),
        stats.visits(),
        session.elapsed(std::time::Instant::now()).as_millis()
    );
    Ok(())
}
