//! Webtop
//!
//! Headless driver for the simulated desktop shell. Reads surface input as
//! JSON lines (or plain terminal lines) on stdin and writes window manager
//! events as JSON lines on stdout. Logs go to stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webtop::{Config, Shell};
use webtop_ipc::{JsonLine, OutputPayload, ShellCommand, WmEvent};
use webtop_terminal::{CommandOutput, FileStore, Host, Typewriter};

/// Host for a console session: confirmations use a fixed answer, everything
/// else is logged
struct ConsoleHost {
    auto_confirm: bool,
}

impl Host for ConsoleHost {
    fn confirm(&mut self, message: &str) -> bool {
        info!("Confirm: {} -> {}", message, self.auto_confirm);
        self.auto_confirm
    }

    fn navigate(&mut self, href: &str) {
        info!("Navigate: {}", href);
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        info!("Clipboard: {:?}", text);
    }

    fn toast(&mut self, message: &str) {
        info!("Toast: {}", message);
    }
}

/// Output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// One JSON event per line
    Json,
    /// Terminal output only, typed out like the on-page terminal
    Plain,
}

/// Main application state
struct WebtopApp {
    shell: Shell<ConsoleHost>,
    stdout: Stdout,
    mode: OutputMode,
    typewriter: Typewriter,

    /// Transition timers report back here
    timer_tx: mpsc::UnboundedSender<ShellCommand>,
    timer_rx: mpsc::UnboundedReceiver<ShellCommand>,
}

impl WebtopApp {
    fn new(config: Config, mode: OutputMode) -> Result<Self> {
        let store_path = config.terminal.store_path()?;
        let store = FileStore::open(&store_path)
            .with_context(|| format!("Failed to open store at {:?}", store_path))?;
        info!("Using store {:?}", store_path);

        let host = ConsoleHost {
            auto_confirm: config.terminal.auto_confirm,
        };
        let typewriter = Typewriter::new(Duration::from_millis(config.terminal.typing_speed_ms));
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        Ok(Self {
            shell: Shell::new(&config, Box::new(store), host),
            stdout: tokio::io::stdout(),
            mode,
            typewriter,
            timer_tx,
            timer_rx,
        })
    }

    async fn run(mut self) -> Result<()> {
        let events = self.shell.boot();
        self.publish(events).await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read stdin")? else {
                        info!("Input closed, exiting");
                        break;
                    };
                    let Some(command) = parse_input(&line) else {
                        continue;
                    };
                    let events = self.shell.handle(command);
                    self.publish(events).await?;
                }
                Some(command) = self.timer_rx.recv() => {
                    let events = self.shell.handle(command);
                    self.publish(events).await?;
                }
            }
        }

        Ok(())
    }

    /// Write events and arm any transition timers they request
    async fn publish(&mut self, events: Vec<WmEvent>) -> Result<()> {
        for event in events {
            if let WmEvent::TransitionScheduled {
                id,
                generation,
                delay_ms,
                ..
            } = &event
            {
                self.schedule(id.clone(), *generation, *delay_ms);
            }

            match self.mode {
                OutputMode::Json => {
                    let line = JsonLine::new(&event)?.encode();
                    self.stdout.write_all(line.as_bytes()).await?;
                }
                OutputMode::Plain => self.render_plain(&event).await?,
            }
        }
        self.stdout.flush().await?;
        Ok(())
    }

    fn schedule(&self, id: String, generation: u64, delay_ms: u64) {
        let tx = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if tx.send(ShellCommand::TransitionElapsed { id, generation }).is_err() {
                debug!("Timer fired after shutdown");
            }
        });
    }

    async fn render_plain(&mut self, event: &WmEvent) -> Result<()> {
        let WmEvent::TerminalOutput {
            index,
            prompt,
            command,
            output,
        } = event
        else {
            debug!("{:?}", event);
            return Ok(());
        };

        if !command.is_empty() {
            self.stdout
                .write_all(format!("{} {}\n", prompt, command).as_bytes())
                .await?;
        }

        match output {
            OutputPayload::Empty => {}
            OutputPayload::Text(text) => {
                let animate = self.shell.appearance().animations;
                let typewriter = self.typewriter;
                for (delay, chunk) in typewriter.frames(text) {
                    if animate {
                        tokio::time::sleep(delay).await;
                    }
                    self.stdout.write_all(chunk.as_bytes()).await?;
                    self.stdout.flush().await?;
                }
                self.stdout.write_all(b"\n").await?;
            }
            OutputPayload::Block(_) => {
                let Some(record) = self.shell.terminal.log().get(*index) else {
                    return Ok(());
                };
                if let CommandOutput::Block(id) = record.output {
                    let block = id.block();
                    let mut text = format!("{}\n", block.title);
                    for line in block.lines {
                        text.push_str(line);
                        text.push('\n');
                    }
                    self.stdout.write_all(text.as_bytes()).await?;
                }
            }
        }
        Ok(())
    }
}

/// JSON commands start with `{`; anything else is a terminal line
fn parse_input(line: &str) -> Option<ShellCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        return match JsonLine::decode_shell_command(trimmed) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Ignoring malformed command: {}", e);
                None
            }
        };
    }
    Some(ShellCommand::RunCommand {
        line: trimmed.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Webtop shell");

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mode = if args.iter().any(|arg| arg == "--plain" || arg == "-p") {
        OutputMode::Plain
    } else {
        OutputMode::Json
    };

    let config = Config::load()?;
    let app = WebtopApp::new(config, mode)?;

    tokio::select! {
        result = app.run() => {
            if let Err(e) = result {
                error!("Application error: {}", e);
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
