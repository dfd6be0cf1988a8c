//! Terminal chat front end
//!
//! Reads lines from stdin and renders view events from the runtime. A number
//! picks from the most recent option list, anything else is sent as text.

use crate::catalog::{CatalogOption, ModuleEntry};
use crate::runtime::{SubmitError, ViewEvent, WizardHandle};
use crate::transcript::{Message, MessageBody, Role};
use std::fmt::Write as _;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("Failed to serialize transcript: {0}")]
    Json(#[from] serde_json::Error),
}

pub type InputLines = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Transcript,
    Reset,
    Option(String),
    Text(String),
}

impl Input {
    pub fn parse(line: &str, options: &[CatalogOption]) -> Self {
        let line = line.trim();
        match line {
            "/quit" | "/exit" => return Input::Quit,
            "/transcript" => return Input::Transcript,
            "/reset" => return Input::Reset,
            _ => {}
        }
        if let Some(option) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
        {
            return Input::Option(option.id.to_string());
        }
        Input::Text(line.to_string())
    }
}

pub fn render_modules(modules: &[ModuleEntry]) -> String {
    let mut out = String::from("¿En qué área quieres trabajar?\n");
    for (i, module) in modules.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} - {}", i + 1, module.title, module.description);
    }
    out
}

/// Module id for a numbered pick, or the typed text as a custom module
pub fn resolve_module(line: &str, modules: &[ModuleEntry]) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let picked = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| modules.get(i));
    Some(picked.map_or_else(|| line.to_string(), |m| m.id.to_string()))
}

pub fn render_options(options: &[CatalogOption]) -> String {
    let mut out = String::new();
    for (i, option) in options.iter().enumerate() {
        let _ = write!(out, "  {}. {}", i + 1, option.label);
        if let Some(sub_label) = option.sub_label {
            let _ = write!(out, " ({sub_label})");
        }
        if let Some(badge) = option.badge {
            let _ = write!(out, " [{badge}]");
        }
        out.push('\n');
        if let Some(description) = option.description {
            let _ = writeln!(out, "     {description}");
        }
        if let Some(benefit) = option.benefit {
            let _ = writeln!(out, "     Beneficio: {benefit}");
        }
        if let Some(risk) = option.risk {
            let _ = writeln!(out, "     Riesgo: {risk}");
        }
        if let Some(reasoning) = option.reasoning {
            let _ = writeln!(out, "     Insight: {reasoning}");
        }
    }
    out
}

pub fn render_message(message: &Message) -> String {
    match (&message.body, message.role) {
        (MessageBody::Text(text), Role::Assistant) => format!("MIPE: {text}"),
        (MessageBody::Text(text), Role::User) => format!("tú: {text}"),
        (MessageBody::Options { options, .. }, _) => render_options(options),
    }
}

/// Ask for a module unless one is already configured
pub async fn choose_module(
    lines: &mut InputLines,
    modules: &[ModuleEntry],
) -> Result<Option<String>, TerminalError> {
    println!("{}", render_modules(modules));
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            return Ok(None);
        }
        if let Some(module) = resolve_module(&line, modules) {
            return Ok(Some(module));
        }
        println!("Elige un número de la lista o escribe el área.");
    }
    Ok(None)
}

/// Chat loop: runs until `/quit` or end of input
pub async fn run(handle: &WizardHandle, lines: &mut InputLines) -> Result<(), TerminalError> {
    let mut events = handle.subscribe();
    let mut options: Vec<CatalogOption> = Vec::new();
    handle.start().await?;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => render_event(&event, &mut options),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Terminal fell behind the wizard");
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(()),
            },
            line = lines.next_line() => {
                let Some(line) = line? else { return Ok(()) };
                match Input::parse(&line, &options) {
                    Input::Quit => return Ok(()),
                    Input::Transcript => {
                        let snapshot = handle.snapshot().await?;
                        println!("{}", serde_json::to_string_pretty(&snapshot)?);
                    }
                    Input::Reset => handle.reset().await?,
                    Input::Option(id) => handle.submit_option(&id).await?,
                    Input::Text(text) => match handle.submit_text(&text).await {
                        Err(SubmitError::BlankInput) => {}
                        other => other?,
                    },
                }
            }
        }
    }
}

fn render_event(event: &ViewEvent, options: &mut Vec<CatalogOption>) {
    match event {
        ViewEvent::Message(message) => {
            // A new prompt retires the previous list until its own options follow
            match message.body.options() {
                Some(list) => *options = list.to_vec(),
                None if message.role == Role::Assistant => options.clear(),
                None => {}
            }
            println!("{}", render_message(message));
        }
        ViewEvent::Typing(true) => println!("MIPE está escribiendo..."),
        ViewEvent::Typing(false) => {}
        ViewEvent::Step { step, placeholder } => {
            if !step.is_terminal() {
                println!("({placeholder})");
            }
        }
        ViewEvent::Rejected { reason } => println!("(no se realizó ningún cambio: {reason})"),
        ViewEvent::Completed { .. } => {
            options.clear();
            println!("Plan listo. Escribe /transcript para ver la conversación o /quit para salir.");
        }
    }
}
