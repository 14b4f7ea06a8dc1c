use anyhow::Result;
use client_core::{PredictionController, Submission, SubmitDisposition};
use shared::domain::ModelLabel;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{render_catalog, render_state};

#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Quit,
    Reset,
    Models,
    Model(&'a str),
    ModelUsage,
    Send,
    Text(&'a str),
}

fn parse_line(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplInput::Send;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ReplInput::Text(line);
    };
    match command.split_once(char::is_whitespace) {
        Some(("model", label)) => ReplInput::Model(label.trim()),
        _ => match command {
            "q" | "quit" | "exit" => ReplInput::Quit,
            "reset" => ReplInput::Reset,
            "models" => ReplInput::Models,
            "model" => ReplInput::ModelUsage,
            _ => ReplInput::Text(line),
        },
    }
}

pub async fn run(controller: &PredictionController, mut model: ModelLabel) -> Result<()> {
    println!("Commands: :model <label>, :models, :reset, :quit");
    println!("Model: {} ({})", model, model.display_name());
    println!("{}", render_state(&controller.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = String::new();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ReplInput::Quit => break,
            ReplInput::Reset => {
                buffer.clear();
                controller.reset().await;
                println!("{}", render_state(&controller.snapshot().await));
            }
            ReplInput::Models => println!("{}", render_catalog(model)),
            ReplInput::ModelUsage => println!("Usage: :model <label>; try :models"),
            ReplInput::Model(raw) => match raw.parse::<ModelLabel>() {
                Ok(label) => {
                    model = label;
                    println!("Model: {} ({})", model, model.display_name());
                }
                Err(err) => println!("{err}; try :models"),
            },
            ReplInput::Text(text) => {
                buffer.push_str(text);
                buffer.push('\n');
            }
            ReplInput::Send => {
                let text = std::mem::take(&mut buffer);
                match controller.submit(Submission::new(text, model)).await {
                    SubmitDisposition::Settled(_) => {
                        println!("{}", render_state(&controller.snapshot().await))
                    }
                    SubmitDisposition::IgnoredInFlight => {
                        println!("A prediction is already running; please wait.")
                    }
                    SubmitDisposition::Superseded => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_sends_buffer() {
        assert_eq!(parse_line(""), ReplInput::Send);
        assert_eq!(parse_line("   "), ReplInput::Send);
    }

    #[test]
    fn colon_commands_are_recognized() {
        assert_eq!(parse_line(":quit"), ReplInput::Quit);
        assert_eq!(parse_line(" :reset "), ReplInput::Reset);
        assert_eq!(parse_line(":models"), ReplInput::Models);
        assert_eq!(parse_line(":model  lr_tfidf "), ReplInput::Model("lr_tfidf"));
    }

    #[test]
    fn bare_model_command_asks_for_a_label() {
        assert_eq!(parse_line(":model"), ReplInput::ModelUsage);
        assert_eq!(parse_line("  :model  "), ReplInput::ModelUsage);
    }

    #[test]
    fn everything_else_is_posting_text() {
        assert_eq!(
            parse_line("Senior engineer, remote"),
            ReplInput::Text("Senior engineer, remote")
        );
        assert_eq!(parse_line(":unknown thing"), ReplInput::Text(":unknown thing"));
    }
}
