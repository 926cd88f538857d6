//! Lumen - workspace session with a line-oriented frontend
//!
//! Usage: `lumen [PATH] [--json] [--no-color]`
//!
//! Configuration is read from `PATH/.lumen.toml` (default: the current
//! directory), then the user config directory, then built-in defaults.

use lumen::app::{self, App, Options};
use lumen::error::Result;
use lumen::logging::init_tracing;
use lumen_core::{load_config, sample_config, Session};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Command-line arguments
struct Args {
    /// Project directory holding `.lumen.toml`
    path: Option<PathBuf>,

    /// Print notifications as JSON lines
    json: bool,

    /// Force colors off
    no_color: bool,

    /// Print a sample config and exit
    sample_config: bool,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> Self {
        let mut args = Args {
            path: None,
            json: false,
            no_color: false,
            sample_config: false,
        };

        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--json" => args.json = true,
                "--no-color" => args.no_color = true,
                "--sample-config" => args.sample_config = true,
                _ if !arg.starts_with('-') => args.path = Some(PathBuf::from(arg)),
                _ => {
                    // Ignore unknown flags
                }
            }
        }
        args
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.sample_config {
        print!("{}", sample_config());
        return Ok(());
    }

    init_tracing();

    let project_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let config = load_config(&project_dir)?;
    let session = Session::from_config(&config)?;

    let options = Options {
        json: args.json,
        color: !args.no_color && !args.json && std::io::stdout().is_terminal(),
    };
    app::run(App::new(session, options))
}
