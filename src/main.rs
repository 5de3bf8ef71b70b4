//! sempro CLI - Register, submit, schedule and assess thesis seminars

use clap::Parser;
use sempro::cli::{commands, Cli, Commands};
use sempro::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("hint: {}", hint);
            }
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> sempro::Result<()> {
    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Some(Commands::Login { username, password }) => {
            commands::login::run(config_dir, &username, password).await
        }
        Some(Commands::Logout) => commands::logout::run(config_dir).await,
        Some(Commands::Whoami { json }) => commands::whoami::run(config_dir, json).await,
        Some(Commands::Requirements { seminar_type }) => {
            commands::requirements::run(seminar_type).await
        }
        Some(Commands::Student { command }) => commands::student::run(config_dir, command).await,
        Some(Commands::Lecturer { command }) => commands::lecturer::run(config_dir, command).await,
        Some(Commands::Coordinator { command }) => {
            commands::coordinator::run(config_dir, command).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
