use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "restrack", version, about = "Restriction roster and muster tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roster management
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },
    /// Muster sign-ins and corrections
    Muster {
        #[command(subcommand)]
        action: commands::muster::MusterAction,
    },
    /// Derived roster status
    Status {
        #[command(subcommand)]
        action: commands::status::StatusAction,
    },
    /// Compliance statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Report generation
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Application settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Bulk export/import
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Roster { action } => commands::roster::run(action),
        Commands::Muster { action } => commands::muster::run(action),
        Commands::Status { action } => commands::status::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
