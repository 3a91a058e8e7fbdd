use anyhow::{Context, Result};
use feedreader::{App, AppConfig, HttpFeedProxy, TerminalDisplay, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const TERMINAL_WIDTH: usize = 80;
const HELP: &str = "commands: <number> open feed, m toggle menu, h help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    Help,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "m" | "menu" => Command::Event(UiEvent::MenuIconClicked),
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(feed_id) => Command::Event(UiEvent::FeedSelected(feed_id)),
            Err(_) => Command::Unknown,
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let registry = config.registry().context("cannot build the feed registry")?;
    let templates = config.templates().context("cannot load templates")?;
    let proxy = HttpFeedProxy::new(&config.proxy_url, config.request_timeout)
        .context("cannot build the http client")?;
    tracing::info!(proxy_url = %proxy.endpoint(), feeds = registry.len(), "starting feed reader");

    let (display, writer) = TerminalDisplay::spawn(std::io::stdout(), TERMINAL_WIDTH)
        .context("cannot start the terminal writer")?;
    let app = App::bootstrap(registry, proxy, display, templates)
        .context("cannot render the feed list")?;
    let (sender, receiver) = mpsc::channel(16);
    let running = tokio::spawn(app.run(std::future::ready(()), receiver));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("cannot read stdin")? {
        match parse_command(&line) {
            Command::Event(event) => {
                if sender.send(event).await.is_err() {
                    break;
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown => tracing::warn!(input = %line.trim(), "unknown command"),
        }
    }

    drop(sender);
    // The display goes with the app; once dropped, the writer drains and exits.
    drop(running.await.context("event loop panicked")?);
    tokio::task::spawn_blocking(move || writer.join())
        .await
        .context("cannot wait for the terminal writer")?
        .map_err(|_| anyhow::anyhow!("terminal writer panicked"))?;
    Ok(())
}
