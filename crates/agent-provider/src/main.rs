//! A simple program demonstrates how to use `agent-provider` as a library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use agent_provider::SessionBuilder;
use agent_provider::core::Provider;
use agent_provider::ollama::{OllamaBackend, OllamaConfigBuilder, models};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = OllamaConfigBuilder::new();
    if let Ok(host) = env::var("OLLAMA_HOST") {
        config = config.with_host(host);
    }
    if let Ok(port) = env::var("OLLAMA_PORT") {
        let Ok(port) = port.parse::<u16>() else {
            eprintln!("OLLAMA_PORT is not a valid port: {port}");
            return;
        };
        config = config.with_port(port);
    }
    let config = config.build();
    let model =
        env::var("OLLAMA_MODEL").unwrap_or_else(|_| models::QWEN2_5.into());

    info!("using {} with model {model}", config.chat_url());
    let provider = Provider::new(OllamaBackend::new(config), model);

    let mut session = SessionBuilder::with_provider(provider)
        .with_system_prompt(
            "You are a helpful assistant. Use the calculator tool for arithmetic.",
        )
        .build();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line(&mut lines).await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(model) = line.strip_prefix("/model ") {
            match session.use_model(model.trim()) {
                Ok(()) => println!("Switched to {}", model.trim().bold()),
                Err(err) => println!("{}", err.bright_red()),
            }
            continue;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let result = session.send_message(line).await;
        progress_bar.finish_and_clear();

        match result {
            Ok(reply) => {
                println!(
                    "{}🤖 {}",
                    BAR_CHAR.bright_cyan(),
                    reply.content.bright_white()
                );
            }
            Err(err) => {
                println!("{}⚠️  {}", BAR_CHAR.bright_red(), err);
            }
        }
    }
}

async fn read_line<R>(lines: &mut Lines<R>) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_line_keeps_buffered_input() {
        let input: &[u8] = b"what is 5 + 3?\n/model llama3.2\nthanks";
        let mut lines = BufReader::new(input).lines();
        assert_eq!(read_line(&mut lines).await.unwrap(), "what is 5 + 3?");
        assert_eq!(read_line(&mut lines).await.unwrap(), "/model llama3.2");
        assert_eq!(read_line(&mut lines).await.unwrap(), "thanks");
        assert!(read_line(&mut lines).await.is_none());
    }
}
