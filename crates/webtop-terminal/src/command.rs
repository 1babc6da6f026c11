//! Command Module
//!
//! Command table, tokenizer and dispatch. Two tiers: context commands, active
//! only while the settings or profile window is focused, and global commands.
//! Context commands take precedence.

use thiserror::Error;
use tracing::debug;

use crate::content::{self, ContentId};
use crate::host::{Download, Host};
use crate::settings::{self, Layout, Theme};

/// Which context table is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandContext {
    #[default]
    Global,
    Settings,
    Profile,
}

/// Commands known to the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
    Cv,
    Readme,
    Download,
    Clear,
    Ls,
    Pwd,
    Neofetch,
    Theme,
    Font,
    Layout,
    Animations,
    Edit,
    Export,
    Import,
    Backup,
    Restore,
    Exit,
}

pub const GLOBAL_COMMANDS: &[(&str, Command)] = &[
    ("help", Command::Help),
    ("about", Command::About),
    ("skills", Command::Skills),
    ("projects", Command::Projects),
    ("experience", Command::Experience),
    ("education", Command::Education),
    ("contact", Command::Contact),
    ("cv", Command::Cv),
    ("readme", Command::Readme),
    ("download", Command::Download),
    ("clear", Command::Clear),
    ("ls", Command::Ls),
    ("pwd", Command::Pwd),
    ("neofetch", Command::Neofetch),
];

pub const SETTINGS_COMMANDS: &[(&str, Command)] = &[
    ("theme", Command::Theme),
    ("font", Command::Font),
    ("layout", Command::Layout),
    ("animations", Command::Animations),
    ("exit", Command::Exit),
];

pub const PROFILE_COMMANDS: &[(&str, Command)] = &[
    ("edit", Command::Edit),
    ("export", Command::Export),
    ("import", Command::Import),
    ("backup", Command::Backup),
    ("restore", Command::Restore),
    ("exit", Command::Exit),
];

impl CommandContext {
    /// Context-only table
    pub fn commands(self) -> &'static [(&'static str, Command)] {
        match self {
            CommandContext::Global => &[],
            CommandContext::Settings => SETTINGS_COMMANDS,
            CommandContext::Profile => PROFILE_COMMANDS,
        }
    }

    /// All command names reachable in this context, context tier first
    pub fn command_names(self) -> impl Iterator<Item = &'static str> {
        self.commands()
            .iter()
            .chain(GLOBAL_COMMANDS)
            .map(|(name, _)| *name)
    }
}

/// Resolve a command name (case-insensitive)
pub fn lookup(name: &str, context: CommandContext) -> Option<Command> {
    let name = name.to_lowercase();
    context
        .commands()
        .iter()
        .chain(GLOBAL_COMMANDS)
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, command)| *command)
}

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Lowercased command name
    pub name: String,
    pub args: Vec<&'a str>,
}

/// Split a line on whitespace; `None` for a blank line
pub fn parse(line: &str) -> Option<Invocation<'_>> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(Invocation {
        name,
        args: tokens.collect(),
    })
}

/// Result payload of one execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Empty,
    Text(String),
    Block(ContentId),
}

impl CommandOutput {
    pub fn text(text: impl Into<String>) -> Self {
        CommandOutput::Text(text.into())
    }
}

/// Side effects the shell applies after a command runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Empty the visible output log (history untouched)
    ClearLog,
    SetTheme(Theme),
    SetFontSize(u8),
    SetLayout(Layout),
    SetAnimations(bool),
    EditProfile { field: String, value: String },
    /// Close the context window and the terminal
    CloseContext(CommandContext),
}

/// Recoverable command failures, rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {0}. Type 'help' for available commands.")]
    UnknownCommand(String),

    #[error("{0}")]
    InvalidArgument(String),
}

impl CommandError {
    fn usage(text: &str) -> Self {
        CommandError::InvalidArgument(text.to_string())
    }
}

/// Output plus effects of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: CommandOutput,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn output(output: CommandOutput) -> Self {
        Self {
            output,
            effects: Vec::new(),
        }
    }

    fn text(text: impl Into<String>) -> Self {
        Self::output(CommandOutput::text(text))
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Evaluate a full line in the given context
pub fn evaluate(
    line: &str,
    context: CommandContext,
    host: &mut dyn Host,
) -> Result<Outcome, CommandError> {
    let Some(invocation) = parse(line) else {
        return Ok(Outcome::output(CommandOutput::Empty));
    };

    let command = lookup(&invocation.name, context)
        .ok_or_else(|| CommandError::UnknownCommand(invocation.name.clone()))?;

    debug!("Running {:?} (context={:?}, args={:?})", command, context, invocation.args);
    run(command, &invocation.args, context, host)
}

/// Execute a resolved command
pub fn run(
    command: Command,
    args: &[&str],
    context: CommandContext,
    host: &mut dyn Host,
) -> Result<Outcome, CommandError> {
    let first = args.first().copied();

    let outcome = match command {
        Command::Help => Outcome::text(content::help_text(context)),
        Command::About => Outcome::output(CommandOutput::Block(ContentId::About)),
        Command::Skills => Outcome::output(CommandOutput::Block(ContentId::Skills)),
        Command::Projects => Outcome::output(CommandOutput::Block(ContentId::Projects)),
        Command::Experience => Outcome::output(CommandOutput::Block(ContentId::Experience)),
        Command::Education => Outcome::output(CommandOutput::Block(ContentId::Education)),
        Command::Contact => Outcome::output(CommandOutput::Block(ContentId::Contact)),
        Command::Cv => Outcome::output(CommandOutput::Block(ContentId::Cv)),
        Command::Neofetch => Outcome::output(CommandOutput::Block(ContentId::Neofetch)),
        Command::Readme => Outcome::text(Download::Readme.run(host)),
        Command::Download => {
            let name = first.ok_or_else(|| {
                CommandError::usage("Usage: download <file>\nAvailable files: cv, readme")
            })?;
            let file = Download::parse(name).ok_or_else(|| {
                CommandError::InvalidArgument(format!(
                    "Unknown file: {}\nAvailable files: cv, readme",
                    name
                ))
            })?;
            Outcome::text(file.run(host))
        }
        Command::Clear => Outcome::output(CommandOutput::Empty).with_effect(Effect::ClearLog),
        Command::Ls => Outcome::text(content::LS_LISTING),
        Command::Pwd => Outcome::text(content::PWD),

        Command::Theme => {
            let theme = first
                .and_then(Theme::parse)
                .ok_or_else(|| CommandError::usage("Usage: theme [light/dark]"))?;
            Outcome::text(format!("Theme changed to {}", theme.as_str()))
                .with_effect(Effect::SetTheme(theme))
        }
        Command::Font => {
            let size = first
                .and_then(settings::parse_font_size)
                .ok_or_else(|| CommandError::usage("Usage: font [size] (12-20)"))?;
            Outcome::text(format!("Font size changed to {}px", size))
                .with_effect(Effect::SetFontSize(size))
        }
        Command::Layout => {
            let layout = first
                .and_then(Layout::parse)
                .ok_or_else(|| CommandError::usage("Usage: layout [grid/list]"))?;
            Outcome::text(format!("Layout changed to {} view", layout.as_str()))
                .with_effect(Effect::SetLayout(layout))
        }
        Command::Animations => {
            let on = first
                .and_then(settings::parse_switch)
                .ok_or_else(|| CommandError::usage("Usage: animations [on/off]"))?;
            Outcome::text(format!("Animations turned {}", if on { "on" } else { "off" }))
                .with_effect(Effect::SetAnimations(on))
        }

        Command::Edit => {
            if args.len() < 2 {
                return Err(CommandError::usage("Usage: edit [field] [value]"));
            }
            let field = args[0].to_string();
            let value = args[1..].join(" ");
            Outcome::text(format!("Updated {} to {}", field, value))
                .with_effect(Effect::EditProfile { field, value })
        }
        Command::Export => Outcome::text("Profile data exported to profile.json"),
        Command::Import => Outcome::text("Profile data imported successfully"),
        Command::Backup => Outcome::text("Profile backup created"),
        Command::Restore => Outcome::text("Profile restored from backup"),

        Command::Exit => match context {
            CommandContext::Settings => Outcome::text("Closing settings..."),
            CommandContext::Profile => Outcome::text("Closing profile..."),
            CommandContext::Global => {
                return Err(CommandError::UnknownCommand("exit".to_string()));
            }
        }
        .with_effect(Effect::CloseContext(context)),
    };

    Ok(outcome)
}
