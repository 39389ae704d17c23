//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docqa_core::config::{self, SERVER_URL_ENV};
use docqa_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "docqa")]
#[command(version)]
#[command(about = "Ask questions about your PDF documents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the question-answering service
    #[arg(long, global = true, value_name = "URL", env = SERVER_URL_ENV)]
    server: Option<String>,

    /// Apply each line's result before reading the next (implied when stdin is piped)
    #[arg(long)]
    wait: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Upload PDF files and start a new session
    Upload {
        /// PDF files to upload
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask a question
    Ask {
        /// The question to ask
        #[arg(value_name = "QUESTION")]
        question: String,

        /// Scope the question to an existing session
        #[arg(long, value_name = "ID")]
        session: Option<String>,
    },
    /// Clear a session on the server
    Reset {
        /// Session to clear
        #[arg(long, value_name = "ID")]
        session: String,
    },
    /// Check that the service is reachable
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // These never touch the config contents, so a broken file cannot block them.
    if let Some(Commands::Config { command }) = &cli.command {
        match command {
            ConfigCommands::Path => {
                commands::config::path();
                return Ok(());
            }
            ConfigCommands::Init => return commands::config::init(),
            ConfigCommands::Show => {}
        }
    }

    let mut config = config::Config::load().context("load config")?;
    if let Some(server) = cli.server.as_deref() {
        config.server.base_url = server.trim().to_string();
    }

    // Held until exit so buffered log lines are flushed.
    let _log_guard = logging::init(&config.log).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    let Cli {
        command,
        server: _,
        wait,
    } = cli;

    // default to chat mode
    let Some(command) = command else {
        return commands::chat::run(&config, wait).await;
    };

    match command {
        Commands::Upload { files } => commands::upload::run(&config, files).await,
        Commands::Ask { question, session } => {
            commands::ask::run(&config, question, session).await
        }
        Commands::Reset { session } => commands::reset::run(&config, session).await,
        Commands::Health => commands::health::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}
