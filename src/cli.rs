use std::path::{Path, PathBuf};

mod init;
mod interactive;
mod report;
mod shell;
mod status;
mod terminal;

use anyhow::Context;
use car_rental::Config;
use clap::ArgAction;
use init::Init;
use interactive::Interactive;
use shell::Shell;
use status::Status;
use tracing::debug;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// A catalog file to load instead of the built-in catalog
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Shell(Shell::default()))
            .run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the session itself
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run a rental session over stdin (default)
    ///
    /// Rentals only last for the session; nothing is saved on exit.
    Shell(Shell),

    /// Run a guided rental session with menus
    Interactive(Interactive),

    /// Show the catalog and the occupancy of every car
    Status(Status),

    /// Write the default catalog to a file
    Init(Init),
}

impl Command {
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Shell(command) => command.run(&load_config(config)?)?,
            Self::Interactive(command) => command.run(&load_config(config)?)?,
            Self::Status(command) => command.run(&load_config(config)?)?,
            Self::Init(command) => command.run()?,
        }
        Ok(())
    }
}

/// Loads the catalog from `path`, or falls back to the built-in catalog.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        debug!("using the built-in catalog");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading catalog");
    Config::load(path).with_context(|| format!("Failed to load catalog from {}", path.display()))
}
