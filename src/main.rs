// EduLog - classroom activity notes
// Main entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edulog::app::App;
use edulog::cli::{commands, Cli, Command};
use edulog::config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edulog=warn")))
        .init();

    let cli = Cli::parse();

    if let Command::Script = cli.command {
        return commands::script();
    }

    let config = load_config()?;
    let mut app = App::from_config(&config)?;

    match cli.command {
        Command::Settings(args) => commands::settings(&mut app, args).await,
        Command::Refresh => commands::refresh(&mut app).await,
        Command::Classes(args) => commands::classes(&mut app, args).await,
        Command::Students(args) => commands::students(&mut app, args).await,
        Command::Log(args) => commands::log(&mut app, args).await,
        Command::Edit(args) => commands::edit(&mut app, args).await,
        Command::Records(args) => commands::records(&app, args),
        Command::Rewrite(args) => commands::rewrite(&app, args).await,
        Command::Script => commands::script(),
    }
}
