// Assistant CLI
// Terminal host for one assistant session: stdin is the chat box, stdout the
// message log, stderr the logs.

use anyhow::{Context, Result};
use assistant_core::brain::SearchHit;
use assistant_core::{
    AssistantConfig, AssistantHandle, AssistantView, Catalog, ChatMessage, LogNavigator, RandomChoices, Role,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "Commands:
  /open [chat|builder|notes]   show the assistant
  /close                       hide the assistant
  /view chat|builder|notes     switch panel
  /note <text> [#tag ...]      save a note
  /delnote <id>                delete a note
  /notes                       list notes
  /summary                     session summary
  /search <query>              search the catalog
  /goto <path>                 navigate to a page
  /watch <content id>          mark content as watched
  /voice                       toggle voice
  /clear                       clear messages and notes
  /quit                        exit
Anything else is sent to the assistant.";

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("assistant-cli".into(), std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_view(raw: &str) -> Option<AssistantView> {
    match raw.trim() {
        "chat" => Some(AssistantView::Chat),
        "builder" => Some(AssistantView::Builder),
        "notes" => Some(AssistantView::Notes),
        _ => None,
    }
}

fn print_message(message: &ChatMessage) {
    println!("\nassistant> {}", message.content);
    for item in &message.suggestions {
        println!("  * {} [{}] ({})", item.title, item.id, item.category);
    }
}

fn print_hits(hits: &[SearchHit<'_>]) {
    if hits.is_empty() {
        println!("No matches.");
    }
    for hit in hits {
        println!("  {:>3}  {} [{}]", hit.score, hit.item.title, hit.item.id);
    }
}

/// Prints assistant messages as they are committed.
async fn echo_replies(mut state: watch::Receiver<assistant_core::AssistantState>) {
    let mut last_seen = 0;
    while state.changed().await.is_ok() {
        let fresh: Vec<ChatMessage> = state
            .borrow_and_update()
            .messages
            .iter()
            .filter(|m| m.role == Role::Assistant && m.id > last_seen)
            .cloned()
            .collect();
        for message in &fresh {
            print_message(message);
            last_seen = message.id;
        }
    }
}

async fn dispatch(assistant: &AssistantHandle, line: &str) -> Result<bool> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "/quit" | "/exit" => return Ok(false),
        "/help" => println!("{}", HELP),
        "/open" => assistant.open(parse_view(rest)).await?,
        "/close" => assistant.close().await?,
        "/view" => match parse_view(rest) {
            Some(view) => assistant.set_view(view).await?,
            None => println!("Unknown view {:?}", rest),
        },
        "/note" => {
            let (tags, words): (Vec<&str>, Vec<&str>) = rest.split_whitespace().partition(|w| w.starts_with('#'));
            let tags = tags.iter().map(|t| t.trim_start_matches('#').to_string()).collect();
            match assistant.add_note(&words.join(" "), tags, None).await? {
                Some(id) => println!("Saved note {}", id),
                None => println!("Notes cannot be empty."),
            }
        }
        "/delnote" => match rest.parse() {
            Ok(id) => println!("{}", if assistant.delete_note(id).await? { "Deleted." } else { "No such note." }),
            Err(_) => println!("Not a note id: {:?}", rest),
        },
        "/notes" => {
            for note in assistant.snapshot().notes {
                println!("  {}  {}", note.id, note.content);
            }
        }
        "/summary" => println!("{}", assistant.get_summary().await?),
        "/search" => print_hits(&assistant.search_content(rest)),
        "/goto" => {
            if !assistant.navigate_to(rest).await? {
                println!("Usage: /goto <path>");
            }
        }
        "/watch" => {
            if !assistant.mark_watched(rest).await? {
                println!("Unknown content id {:?}", rest);
            }
        }
        "/voice" => println!("Voice {}", if assistant.toggle_voice().await? { "on" } else { "off" }),
        "/clear" => assistant.clear_history().await?,
        _ if command.starts_with('/') => println!("Unknown command. Try /help."),
        _ => {
            assistant.send_message(line).await?;
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AssistantConfig::from_env().context("invalid assistant configuration")?;
    init_tracing(config.log_json);

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::builtin().context("built-in catalog is invalid")?,
    };
    info!(items = catalog.len(), "Catalog ready");

    let assistant = AssistantHandle::with_options(
        Arc::new(catalog),
        Arc::new(LogNavigator),
        config,
        Box::new(RandomChoices::from_entropy()),
    );
    assistant.open(None).await?;
    tokio::spawn(echo_replies(assistant.subscribe()));

    println!("Learning assistant ready. Type /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match dispatch(&assistant, line).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => warn!("Command failed: {:#}", e),
        }
    }

    assistant.shutdown().await?;
    Ok(())
}
