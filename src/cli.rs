use clap::{Parser, Subcommand};

use crate::github::API_BASE_URL;

#[derive(Parser)]
#[command(name = "repo-languages")]
#[command(about = "Lists a GitHub user's public repositories with their primary language")]
#[command(version)]
pub struct Cli {
    /// GitHub token sent as a bearer credential (optional, raises the rate limit)
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API root URL
    #[arg(long, env = "GITHUB_API_URL", global = true, default_value = API_BASE_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a user's repositories once and print them
    Fetch {
        /// GitHub username
        username: String,

        /// Print the raw result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the interactive repository widget
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,
    },
}
