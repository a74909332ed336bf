use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod utils;
mod views;

use api::bank::BankClient;
use commands::{Console, Reply};
use config::AppConfig;

fn prompt(console: &Console) {
    let who = console
        .shell()
        .role()
        .map(|role| role.to_string())
        .unwrap_or_else(|| "guest".to_string());
    print!("atm[{}]> ", who);
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "atm_console=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🏧 Starting ATM console...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!("Backend: {}", config.api_base_url);

    let client = match BankClient::http(&config.api_base_url) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {:?}", e);
            return;
        }
    };

    let mut console = Console::start(client, config.history_page_size).await;
    println!("{}", console.render());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&console);

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match console.handle_line(&line).await {
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    info!("Goodbye");
}
