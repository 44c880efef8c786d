use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::Game;
use crate::domain::JobStatus;

#[derive(Parser, Debug)]
#[command(author, version, about = "Job and price tracker for rank-boosting pilots")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Create an account and sign in
    SignUp {
        username: String,
        password: String,
        /// Password again
        confirm: String,
    },
    /// Sign in to an existing account
    SignIn { username: String, password: String },
    /// End the current session
    SignOut,
    /// Show the signed-in user
    WhoAmI,
    /// Choose the game you take jobs for
    Game {
        /// "codm", "mlbb" or the full game name
        game: Game,
    },
    /// Show or edit your tier prices
    Prices {
        #[clap(subcommand)]
        command: PricesCommand,
    },
    /// Price a rank range without saving a job
    Quote {
        /// Start rank, e.g. "Master I"
        start: String,
        /// End rank, e.g. "Grandmaster I" (not charged)
        end: String,
    },
    /// Manage pilot jobs
    Job {
        #[clap(subcommand)]
        command: JobCommand,
    },
    /// Totals for completed and pending jobs
    Earnings,
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum PricesCommand {
    /// List every tier with its price
    Show {
        #[arg(short, long, default_value = "codm")]
        game: Game,
    },
    /// Set prices, e.g. `Master-I=10 Master-II=12.5`; an empty value clears a price
    Set {
        #[arg(short, long, default_value = "codm")]
        game: Game,
        #[arg(required = true, value_parser = parse_price_input)]
        entries: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum JobCommand {
    /// Save a new pending job
    Create {
        #[arg(short, long)]
        client: String,
        /// YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        #[arg(short, long)]
        start: String,
        #[arg(short, long)]
        end: String,
    },
    /// List jobs, optionally only pending or completed ones
    List {
        #[arg(short, long)]
        status: Option<JobStatus>,
    },
    /// Change a job's client name and date
    Edit {
        #[arg(value_parser = parse_position)]
        number: usize,
        #[arg(short, long)]
        client: String,
        #[arg(short, long)]
        date: String,
    },
    /// Mark a job completed
    Complete {
        #[arg(value_parser = parse_position)]
        number: usize,
    },
    /// Mark a job pending again
    Reopen {
        #[arg(value_parser = parse_position)]
        number: usize,
    },
    /// Delete a job permanently
    Delete {
        #[arg(value_parser = parse_position)]
        number: usize,
    },
}

fn parse_price_input(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected STEP=PRICE, got '{raw}'"))
}

/// Job numbers are shown starting at 1; positions start at 0
fn parse_position(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .ok_or_else(|| format!("job number must be 1 or more, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_price_entries() {
        let cli = Cli::try_parse_from(["pilot_ledger", "prices", "set", "Master-I=10", "Pro-II="])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Prices {
                command: PricesCommand::Set {
                    game: Game::CallOfDutyMobile,
                    entries: vec![
                        ("Master-I".into(), "10".into()),
                        ("Pro-II".into(), "".into())
                    ],
                }
            }
        );
    }

    #[test]
    fn test_job_numbers_are_one_based() {
        let cli = Cli::try_parse_from(["pilot_ledger", "job", "complete", "1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Job {
                command: JobCommand::Complete { number: 0 }
            }
        );
        assert!(Cli::try_parse_from(["pilot_ledger", "job", "delete", "0"]).is_err());
    }

    #[test]
    fn test_status_filter_and_game_names() {
        let cli = Cli::try_parse_from(["pilot_ledger", "job", "list", "--status", "completed"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Job {
                command: JobCommand::List {
                    status: Some(JobStatus::Completed)
                }
            }
        );

        let cli = Cli::try_parse_from(["pilot_ledger", "game", "Mobile Legends: Bang Bang"]).unwrap();
        assert_eq!(cli.command, Command::Game { game: Game::MobileLegends });
    }
}
