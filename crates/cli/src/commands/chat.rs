//! Interactive screening session on stdin/stdout.
//!
//! The conversation runs until the candidate types an exit keyword, the
//! question set has been delivered, or stdin closes. Whatever profile
//! details were collected are printed as a summary at the end.

use std::io::{self, BufRead, Write};

use scout_agent::{Conversation, GeminiClient, PromptCatalog};
use scout_core::config::{AppConfig, LoadOptions, LogFormat};
use scout_core::{sanitize_input, ApplicationError, Stage};

use super::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            let error = ApplicationError::from(error);
            return CommandResult::failure(
                "chat",
                "config_validation",
                format!("{} ({error})", error.user_message()),
                2,
            );
        }
    };
    init_logging(&config);

    let oracle = match GeminiClient::from_config(&config.llm) {
        Ok(oracle) => oracle,
        Err(error) => {
            let error = ApplicationError::Integration(error.to_string());
            return CommandResult::failure(
                "chat",
                "llm_client",
                format!("{} ({error})", error.user_message()),
                3,
            );
        }
    };
    let catalog = match PromptCatalog::new() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("chat", "prompt_catalog", error.to_string(), 4);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "chat",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                5,
            );
        }
    };

    let mut conversation = Conversation::new(oracle, catalog);
    runtime.block_on(run_session(&mut conversation));

    let summary = if conversation.candidate().is_empty() {
        "No information collected yet.".to_string()
    } else {
        conversation.candidate().render_summary()
    };
    CommandResult::success("chat", format!("session ended\ncollected details:\n{summary}"))
}

async fn run_session(conversation: &mut Conversation<GeminiClient>) {
    // The assistant speaks first: open the session with a synthetic hello
    // so the greeting arrives before any candidate input.
    let opening = conversation.process_turn("Hello").await;
    print_reply(&opening);

    let stdin = io::stdin();
    loop {
        print!("You: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(event_name = "chat.stdin_failed", error = %error, "stdin read failed; ending session");
                break;
            }
        }

        let sanitized = sanitize_input(&line);
        let text = sanitized.trim();
        if text.is_empty() {
            continue;
        }

        let reply = conversation.process_turn(text).await;
        print_reply(&reply);

        if conversation.stage() == Stage::End {
            break;
        }
    }
}

fn print_reply(reply: &str) {
    println!("Scout: {reply}");
    println!();
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
