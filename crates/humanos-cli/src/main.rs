use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "humanos-cli", version, about = "HumanOS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily ritual checklist
    Ritual {
        #[command(subcommand)]
        action: commands::ritual::RitualAction,
    },
    /// Weekly habit grids (work and personal)
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Pill tracking
    Pill {
        #[command(subcommand)]
        action: commands::pill::PillAction,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Progress statistics and histories
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Week lifecycle
    Week {
        #[command(subcommand)]
        action: commands::week::WeekAction,
    },
    /// Account data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Presentation settings stored on the record
    Ui {
        #[command(subcommand)]
        action: commands::ui::UiAction,
    },
    /// Print the full progress record as JSON
    Status,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ritual { action } => commands::ritual::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Pill { action } => commands::pill::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Week { action } => commands::week::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Ui { action } => commands::ui::run(action),
        Commands::Status => commands::status::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_core_invocations() {
        for args in [
            vec!["humanos-cli", "ritual", "toggle", "2"],
            vec!["humanos-cli", "habit", "add", "Deep work", "--personal"],
            vec!["humanos-cli", "habit", "days", "0", "--days", "0,1,2"],
            vec!["humanos-cli", "pill", "add", "Vitamin D", "--time", "morning"],
            vec![
                "humanos-cli",
                "calendar",
                "add",
                "2026-01-09",
                "Dentist",
                "--time",
                "15:00",
                "--color",
                "red",
            ],
            vec!["humanos-cli", "stats", "show"],
            vec!["humanos-cli", "week", "reset"],
            vec!["humanos-cli", "ui", "theme", "focus"],
            vec!["humanos-cli", "status"],
            vec!["humanos-cli", "config", "set", "active_user", "mira"],
        ] {
            Cli::try_parse_from(args.clone()).unwrap_or_else(|e| panic!("{args:?}: {e}"));
        }
    }

    #[test]
    fn rejects_unknown_subcommands() {
        assert!(Cli::try_parse_from(["humanos-cli", "timer", "start"]).is_err());
    }
}
