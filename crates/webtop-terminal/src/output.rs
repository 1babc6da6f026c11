//! Output log and typewriter reveal

use std::time::Duration;

use crate::command::CommandOutput;
use crate::content::ContentId;

pub const DEFAULT_TYPING_SPEED: Duration = Duration::from_millis(50);

/// One executed (or cancelled) line as shown in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command: String,
    pub output: CommandOutput,
}

impl CommandRecord {
    pub fn new(command: impl Into<String>, output: CommandOutput) -> Self {
        Self {
            command: command.into(),
            output,
        }
    }

    /// Text outputs are revealed character by character; blocks appear at once
    pub fn is_animated(&self) -> bool {
        matches!(self.output, CommandOutput::Text(_))
    }

    /// Text copied when the record is clicked
    pub fn copy_text(&self) -> String {
        if !self.command.is_empty() {
            return self.command.clone();
        }
        match &self.output {
            CommandOutput::Text(text) => text.clone(),
            CommandOutput::Block(id) => block_text(*id),
            CommandOutput::Empty => String::new(),
        }
    }
}

fn block_text(id: ContentId) -> String {
    let block = id.block();
    let mut text = String::from(block.title);
    for line in block.lines {
        text.push('\n');
        text.push_str(line);
    }
    text
}

/// Append-only log of records. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    records: Vec<CommandRecord>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index
    pub fn push(&mut self, record: CommandRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, index: usize) -> Option<&CommandRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fixed-speed character reveal
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    speed: Duration,
}

impl Typewriter {
    pub fn new(speed: Duration) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Time needed to reveal all of `text`
    pub fn duration(&self, text: &str) -> Duration {
        self.speed * text.chars().count() as u32
    }

    /// Prefix of `text` visible after `elapsed`
    pub fn visible<'a>(&self, text: &'a str, elapsed: Duration) -> &'a str {
        let shown = if self.speed.is_zero() {
            usize::MAX
        } else {
            (elapsed.as_millis() / self.speed.as_millis().max(1)) as usize
        };

        match text.char_indices().nth(shown) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    /// Characters to print, each paired with the delay before it
    pub fn frames<'a>(&self, text: &'a str) -> impl Iterator<Item = (Duration, &'a str)> + 'a {
        let speed = self.speed;
        text.char_indices()
            .map(move |(start, ch)| (speed, &text[start..start + ch.len_utf8()]))
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_SPEED)
    }
}
