use std::path::{Path, PathBuf};

mod add;
mod list;
mod render;
mod session;
mod terminal;

use add::Add;
use clap::ArgAction;
use list::List;
use reviews::{Browser, Config, ReviewStore};
use session::Session;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "reviews.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.config);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&config)
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
    /// List reviews with filters (default)
    List(List),

    /// Add a review to the sample set and show the result
    ///
    /// Missing fields are prompted for when running in a terminal.
    Add(Add),

    /// Browse interactively, one command per line
    ///
    /// Type 'help' in the session for the list of commands.
    Session(Session),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(config)?,
            Self::Add(command) => command.run(config)?,
            Self::Session(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// A session over the sample reviews, set up from `config`.
fn browser(config: &Config) -> Browser {
    Browser::new(ReviewStore::seeded())
        .with_default_sort(config.default_sort())
        .with_fixed_date(config.today())
}

fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}
