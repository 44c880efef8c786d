use anyhow::Result;

use pilot_ledger::cli::Command;
use pilot_ledger::display::print_notice;
use pilot_ledger::errors::user_notice;
use pilot_ledger::{
    handle_completions, handle_earnings, handle_game, handle_job, handle_prices, handle_quote,
    handle_sign_in, handle_sign_out, handle_sign_up, handle_who_am_i, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        log::debug!("{e:?}");
        print_notice(&user_notice(&e));
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::SignUp {
            username,
            password,
            confirm,
        } => handle_sign_up(username, password, confirm),
        Command::SignIn { username, password } => handle_sign_in(username, password),
        Command::SignOut => handle_sign_out(),
        Command::WhoAmI => handle_who_am_i(),
        Command::Game { game } => handle_game(*game),
        Command::Prices { command } => handle_prices(command),
        Command::Quote { start, end } => handle_quote(start, end),
        Command::Job { command } => handle_job(command),
        Command::Earnings => handle_earnings(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

