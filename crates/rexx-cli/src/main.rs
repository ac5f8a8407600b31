use clap::{Parser, Subcommand};
use rexx_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "rexx", version, about = "Rexx Focus: timer, todos and daily stats")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Keep all state in memory for this invocation
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Todo list
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Daily statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Durations, presets, sound and theme
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    // The subscriber depends on the config, so a load failure is reported
    // only once it is installed.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "falling back to default config");
    }

    let out = commands::Output { json: cli.json };
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action, out),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
        Commands::Timer { action } => commands::with_app(&config, cli.ephemeral, |app| {
            commands::timer::run(app, action, out)
        }),
        Commands::Todo { action } => commands::with_app(&config, cli.ephemeral, |app| {
            commands::todo::run(app, action, out)
        }),
        Commands::Stats { action } => commands::with_app(&config, cli.ephemeral, |app| {
            commands::stats::run(app, action, out)
        }),
        Commands::Settings { action } => commands::with_app(&config, cli.ephemeral, |app| {
            commands::settings::run(app, action, out)
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
