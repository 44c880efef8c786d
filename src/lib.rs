pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod ladder;
pub mod services;
pub mod storage;
pub mod stores;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, JobCommand, PricesCommand};
use crate::config::{AppConfig, Game};
use crate::domain::{AuthContext, JobStatus};
use crate::services::{AuthService, JobService, NewJob, PricingService};
use crate::storage::SqliteStore;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

/// Services wired to the on-disk store
pub struct App {
    pub auth: AuthService<SqliteStore>,
    pub pricing: PricingService<SqliteStore>,
    pub jobs: JobService<SqliteStore>,
}

impl App {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(SqliteStore::open(&config.storage.database_path)?);
        Ok(Self {
            auth: AuthService::new(Arc::clone(&store), config.accounts.clone()),
            pricing: PricingService::new(Arc::clone(&store)),
            jobs: JobService::new(store)?,
        })
    }

    async fn signed_in(&self) -> Result<AuthContext> {
        self.auth.current().await
    }
}

fn run<F, Fut>(work: F) -> Result<()>
where
    F: FnOnce(App) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let app = App::open(&config)?;
        work(app).await
    })
}

pub fn handle_sign_up(username: &str, password: &str, confirm: &str) -> Result<()> {
    run(|app| async move {
        let context = app.auth.sign_up(username, password, confirm).await?;
        println!("Account created. Signed in as {}", context.username);
        println!("{}", display::describe_destination(services::Destination::ChooseGame));
        Ok(())
    })
}

pub fn handle_sign_in(username: &str, password: &str) -> Result<()> {
    run(|app| async move {
        let signed_in = app.auth.sign_in(username, password).await?;
        println!("Signed in as {}", signed_in.context.username);
        println!("{}", display::describe_destination(signed_in.destination));
        Ok(())
    })
}

pub fn handle_sign_out() -> Result<()> {
    run(|app| async move {
        app.auth.sign_out().await?;
        println!("Signed out");
        Ok(())
    })
}

pub fn handle_who_am_i() -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        println!("{}", context.username);
        Ok(())
    })
}

pub fn handle_game(game: Game) -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        let destination = app.auth.choose_game(&context, game).await?;
        println!("{}", display::describe_destination(destination));
        Ok(())
    })
}

pub fn handle_prices(command: &PricesCommand) -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        match command {
            PricesCommand::Show { game } => {
                let sheet = app.pricing.price_sheet(&context, *game).await?;
                display::print_lines(&sheet);
            }
            PricesCommand::Set { game, entries } => {
                let table = app.pricing.update(&context, *game, entries).await?;
                println!("Prices saved ({} tiers priced)", table.len());
            }
        }
        Ok(())
    })
}

pub fn handle_quote(start: &str, end: &str) -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        let quote = app
            .pricing
            .quote(&context, Game::CallOfDutyMobile, start, end)
            .await?;
        display::print_quote(&quote);
        Ok(())
    })
}

pub fn handle_job(command: &JobCommand) -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        match command {
            JobCommand::Create {
                client,
                date,
                start,
                end,
            } => {
                let form = NewJob {
                    client_name: client.clone(),
                    date: date.clone(),
                    start: start.clone(),
                    end: end.clone(),
                };
                let job = app.jobs.create(&context, &form).await?;
                println!("Job saved: {} for {}", job.client_name, job.total);
            }
            JobCommand::List { status } => {
                let listed = match status {
                    Some(status) => app.jobs.list_by_status(&context, *status).await?,
                    None => app.jobs.list(&context).await?.into_iter().enumerate().collect(),
                };
                display::print_jobs(listed.iter().map(|(position, job)| (*position, job)));
            }
            JobCommand::Edit {
                number,
                client,
                date,
            } => {
                let job = app.jobs.edit(&context, *number, client, date).await?;
                println!("{}", display::format_job(*number, &job));
            }
            JobCommand::Complete { number } => {
                let job = app
                    .jobs
                    .set_status(&context, *number, JobStatus::Completed)
                    .await?;
                println!("{}", display::format_job(*number, &job));
            }
            JobCommand::Reopen { number } => {
                let job = app
                    .jobs
                    .set_status(&context, *number, JobStatus::Pending)
                    .await?;
                println!("{}", display::format_job(*number, &job));
            }
            JobCommand::Delete { number } => {
                let job = app.jobs.delete(&context, *number).await?;
                println!("Deleted job for {}", job.client_name);
            }
        }
        Ok(())
    })
}

pub fn handle_earnings() -> Result<()> {
    run(|app| async move {
        let context = app.signed_in().await?;
        let earnings = app.jobs.earnings(&context).await?;
        display::print_earnings(&earnings);
        Ok(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
