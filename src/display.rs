use colored::Colorize;

use crate::domain::{Earnings, JobRecord, JobStatus};
use crate::errors::Notice;
use crate::services::{Destination, Quote, QuoteLine};

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) => value.to_string(),
        None => "N/A".to_string(),
    }
}

fn format_status(status: JobStatus) -> String {
    match status {
        JobStatus::Pending => status.as_str().yellow().to_string(),
        JobStatus::Completed => status.as_str().green().to_string(),
    }
}

/// One-line summary: `#3 Kai 2024-05-01 Master-I..Master-V (5 steps) 50 [pending]`
pub fn format_job(position: usize, job: &JobRecord) -> String {
    format!(
        "#{} {} {} {} ({} steps) {} [{}]",
        position + 1,
        job.client_name.bold(),
        job.date,
        format_span(job),
        job.range.len(),
        job.total,
        format_status(job.status)
    )
}

fn format_span(job: &JobRecord) -> String {
    match (job.range.first(), job.range.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}..{last}"),
        (Some(only), _) => only.to_string(),
        _ => "-".to_string(),
    }
}

pub fn print_jobs<'a>(jobs: impl IntoIterator<Item = (usize, &'a JobRecord)>) {
    let mut shown = 0;
    for (position, job) in jobs {
        println!("{}", format_job(position, job));
        shown += 1;
    }
    if shown == 0 {
        println!("No jobs yet");
    }
}

pub fn print_lines(lines: &[QuoteLine]) {
    for line in lines {
        println!("{} — {}", line.step, format_price(line.price));
    }
}

pub fn print_quote(quote: &Quote) {
    println!("{}", format!("Steps included ({}):", quote.lines.len()).bold());
    print_lines(&quote.lines);
    println!("{} {}", "Total:".bold(), quote.total);
}

pub fn print_earnings(earnings: &Earnings) {
    println!("{}", "Total Earned".bold());
    println!(
        "  completed: {} ({} jobs)",
        earnings.completed_total.to_string().green(),
        earnings.completed_jobs
    );
    println!(
        "  pending:   {} ({} jobs)",
        earnings.pending_total.to_string().yellow(),
        earnings.pending_jobs
    );
}

pub fn describe_destination(destination: Destination) -> String {
    match destination {
        Destination::ChooseGame => "Next: choose a game with `game codm`".to_string(),
        Destination::SetPrices(game) => {
            format!("Next: set your {} prices with `prices set`", game)
        }
        Destination::Dashboard(game) => format!("{} dashboard is ready", game),
        Destination::Home => "This game is not supported yet".to_string(),
    }
}

pub fn print_notice(notice: &Notice) {
    eprintln!("{}: {}", notice.title.red().bold(), notice.message);
}
