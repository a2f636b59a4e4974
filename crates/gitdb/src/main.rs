//! gitdb - SQLite-backed commit index for local repositories

use anyhow::{Context, Result};
use clap::Parser;
use types::Commit;

mod cli;
mod db;
mod git;
mod settings;

use cli::{Cli, Command};
use db::Database;
use output::Console;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // settings first: they carry the logging configuration
    let settings = settings::load(args.env_dir.as_deref()).context("Failed to load settings")?;

    logging::init(&logging::LogOptions {
        level: settings.log_level.clone(),
        format: logging::LogFormat::parse(&settings.log_format),
    })?;

    tracing::info!("Starting gitdb v{}", env!("CARGO_PKG_VERSION"));

    let console = Console::new()?;
    let database = Database::open(&settings.database_path, settings.wal)
        .await
        .context("Failed to open index database")?;
    database
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    match args.command {
        Command::Index { repo, max } => {
            let repo = repo.unwrap_or_else(|| settings.repo.clone());
            console.step(&format!("Indexing {}", repo.display()));

            let commits = git::list_commits(&repo, max)?;
            let inserted = database.insert_commits(&commits).await?;

            console.success(&format!(
                "Indexed {} new commit(s) ({} read)",
                inserted,
                commits.len()
            ));
        }
        Command::Recent { limit } => {
            let commits = database.recent(limit).await?;
            print_commits(&console, &commits);
        }
        Command::Search { term, limit } => {
            let commits = database.search(&term, limit).await?;
            if commits.is_empty() {
                console.info(&format!("No commits matching \"{}\"", term));
            } else {
                print_commits(&console, &commits);
            }
        }
        Command::Stats => {
            let stats = database.stats().await?;
            let listing = tabular::key_value([
                ("Commits", stats.commits.to_string()),
                ("Authors", stats.authors.to_string()),
                ("Newest", format_date(stats.newest)),
                ("Oldest", format_date(stats.oldest)),
            ]);
            println!("{}", listing);
        }
    }

    database.close().await;
    Ok(())
}

fn print_commits(console: &Console, commits: &[Commit]) {
    if commits.is_empty() {
        console.info("Index is empty");
        return;
    }

    let mut table = tabular::TableBuilder::new().headers(["Hash", "Author", "Date", "Summary"]);
    for commit in commits {
        table = table.row([
            commit.short_hash().to_string(),
            commit.author_name.clone(),
            commit.authored_at.format("%Y-%m-%d %H:%M").to_string(),
            tabular::truncate(&commit.summary, 60),
        ]);
    }
    println!("{}", table.render());
}

fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
