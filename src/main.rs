use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use repo_languages::cli::{Cli, Commands};
use repo_languages::github::GitHubClient;
use repo_languages::models::FetchResult;
use repo_languages::table::Table;
use repo_languages::web::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let github = GitHubClient::with_base_url(&cli.api_url, cli.token.clone())
        .with_context(|| format!("Failed to create GitHub client for {}", cli.api_url))?;

    if !github.is_authenticated() {
        eprintln!(
            "{}",
            "No GITHUB_TOKEN set, using the unauthenticated rate limit".yellow()
        );
    }

    match cli.command {
        Commands::Fetch { username, json } => {
            let result = github.fetch(&username).await;
            print_result(&result, json)?;
            Ok(if result.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Serve { host, port } => {
            println!("{}", "GitHub Repository Widget".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());
            println!("📡 Open http://{}:{} in a browser", host, port);
            println!("\nPress Ctrl+C to stop the server\n");

            let state = AppState::new(github);
            tokio::select! {
                served = web::serve(state, &host, port) => {
                    served.context("Repository widget server failed")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("\n🛑 Shutting down server...");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_result(result: &FetchResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let table = Table::from(result);
    let text = table.to_text();
    let mut lines = text.lines();
    if let Some(header) = lines.next() {
        if result.is_error() {
            println!("{}", header.red().bold());
        } else {
            println!("{}", header.bold());
        }
    }
    for line in lines {
        println!("{}", line);
    }

    if let FetchResult::Success(repos) = result {
        println!("\n{} repositories", repos.len().to_string().green());
    }

    Ok(())
}
