use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use docsense::infrastructure::observability::{TracingConfig, init_tracing};
use docsense::presentation::frontend::{ChatApiClient, ChatSession};
use docsense::presentation::{Environment, Settings};

const GREETING: &str = "Welcome! Please introduce yourself: your full name, ID number, gender, \
age, HMO, HMO card number and insurance membership tier. \
(ברוכים הבאים! אנא הציגו את עצמכם)";

#[derive(Parser)]
#[command(name = "docsense-chat")]
#[command(version)]
#[command(about = "Terminal chat client for the medical services API", long_about = None)]
struct Cli {
    /// Base URL of the API server.
    #[arg(long, env = "DOCSENSE_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Directory holding appsettings.toml.
    #[arg(long, value_name = "DIR", default_value = ".")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings =
        Settings::load(&cli.config_dir, environment).context("Failed to load configuration")?;

    // Keep the console for the conversation itself.
    let tracing_config = TracingConfig {
        level: "warn".to_string(),
        ..settings.logging.tracing_config(environment)
    };
    init_tracing(&tracing_config, "chat");

    let api_url = cli.api_url.unwrap_or(settings.frontend.api_url);
    let client = ChatApiClient::new(api_url).context("Failed to create API client")?;
    let mut session = ChatSession::new(client);

    println!("{}", "Medical Services Chatbot".bold());
    println!("{}", format!("Session {}", session.session_id()).dimmed());
    println!("{}", "Step 1: Information Collection".cyan().bold());
    println!("{GREETING}");

    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = if session.in_qa_phase() { "❓ " } else { "👤 " };
        match editor.readline(prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(input) {
                    tracing::debug!(error = %e, "Failed to record history entry");
                }

                if session.in_qa_phase() {
                    let answer = session.ask(input).await;
                    print_reply(&answer);
                } else {
                    let reply = session.submit_info(input).await;
                    print_reply(&reply);
                    if session.in_qa_phase() {
                        println!("{}", "Step 2: Q&A".cyan().bold());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    println!(
        "{}",
        format!("Goodbye! {} question(s) answered.", session.history().len()).dimmed()
    );
    Ok(())
}

fn print_reply(text: &str) {
    if text.starts_with("Error:") {
        println!("{}", text.red());
    } else {
        println!("🤖 {}", text);
    }
}
