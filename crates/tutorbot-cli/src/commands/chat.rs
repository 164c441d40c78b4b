//! The `tutorbot chat` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use tutorbot_core::traits::Tutor;
use tutorbot_providers::config::load_config_from;
use tutorbot_providers::create_tutor;

pub async fn execute(
    message: Option<String>,
    delay_ms: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(delay) = delay_ms {
        config.tutor.thinking_delay_ms = delay;
    }
    let tutor = create_tutor(&config.tutor);

    if let Some(message) = message {
        return reply(tutor.as_ref(), &message).await;
    }

    println!("Ask me anything about your CBC learning areas. Type 'exit' to leave.");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }
        reply(tutor.as_ref(), message).await?;
    }
    println!("Goodbye!");
    Ok(())
}

async fn reply(tutor: &dyn Tutor, message: &str) -> Result<()> {
    let answer = tutor.respond(message).await?;
    tracing::debug!(
        tutor = tutor.name(),
        latency_ms = answer.latency_ms,
        matched = ?answer.matched_keyword,
        "reply"
    );
    println!("Tutor: {}", answer.content);
    Ok(())
}
