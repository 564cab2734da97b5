use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use gmail_threads::auth::{token_manager::TokenManager, token_store};
use gmail_threads::config::{DEFAULT_OUTPUT_PATH, load_config};
use gmail_threads::mail::gmail_client::GmailClient;
use gmail_threads::output::{read_threads, render_threads, write_threads};

#[derive(Parser)]
#[command(name = "gmail_threads")]
#[command(about = "Fetch recent Gmail messages as cleaned, threaded JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch messages, group them into threads and save as JSON
    Fetch {
        /// How many recent messages to fetch (config `max_results`, default 10)
        #[arg(long)]
        max_results: Option<u32>,

        /// Gmail label to read from (config `label`, default INBOX)
        #[arg(long)]
        label: Option<String>,

        /// Where to write the JSON (config `output_path`, default email_threads.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Don't print the thread listing
        #[arg(long)]
        quiet: bool,
    },

    /// Print a previously saved thread file
    Show {
        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        input: PathBuf,
    },

    /// Store the OAuth client secret in keyring
    SetClientSecret {
        #[arg(long)]
        client_id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::SetClientSecret { client_id } => {
            eprintln!("Paste client secret (end with Ctrl-D):");
            let mut secret = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut secret)?;
            token_store::save_client_secret(&client_id, secret.trim())?;
            println!("Saved client secret for client_id {}", client_id);
            Ok(())
        }

        Command::Show { input } => {
            let threads = read_threads(&input)?;
            print!("{}", render_threads(&threads));
            Ok(())
        }

        Command::Fetch {
            max_results,
            label,
            output,
            quiet,
        } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let max_results = max_results.unwrap_or_else(|| cfg.max_results());
            let label = label.unwrap_or_else(|| cfg.label().to_string());
            let output = output.unwrap_or_else(|| cfg.output_path());

            let token_mgr = TokenManager::from_config(&cfg)?;
            let access = token_mgr.get_access_token()?;

            let gmail = GmailClient::new(cfg.api_base())?;
            let threads = gmail.fetch_threads(&access, &label, max_results)?;
            info!("assembled {} threads", threads.len());

            write_threads(&output, &threads)?;
            println!("Saved email threads to {}", output.display());

            if !quiet {
                print!("{}", render_threads(&threads));
            }
            Ok(())
        }
    }
}
