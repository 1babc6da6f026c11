//! Host collaborators
//!
//! The terminal never touches the page directly. Confirmation dialogs,
//! navigation, the clipboard and toasts are delegated to a [`Host`].

use tracing::debug;

/// Presentation primitives provided by the embedding surface
pub trait Host {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Navigate to a file (triggers a download)
    fn navigate(&mut self, href: &str);

    /// Write text to the clipboard
    fn copy_to_clipboard(&mut self, text: &str);

    /// Show a transient notification
    fn toast(&mut self, message: &str);
}

/// Downloadable files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Cv,
    Readme,
}

impl Download {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cv" => Some(Download::Cv),
            "readme" => Some(Download::Readme),
            _ => None,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Download::Cv => "Would you like to download the CV?",
            Download::Readme => "Would you like to download the README file?",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Download::Cv => "images/cv-template.pdf",
            Download::Readme => "README.md",
        }
    }

    pub fn started(self) -> &'static str {
        match self {
            Download::Cv => "CV download started!",
            Download::Readme => "README download started!",
        }
    }

    /// Run the confirm → navigate → toast flow; returns the user-facing result
    pub fn run(self, host: &mut dyn Host) -> &'static str {
        if !host.confirm(self.prompt()) {
            debug!("Download of {:?} cancelled", self);
            return "Download cancelled.";
        }
        host.navigate(self.href());
        host.toast(self.started());
        self.started()
    }
}

/// A collaborator call captured by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Confirm(String),
    Navigate(String),
    Copy(String),
    Toast(String),
}

/// Headless host answering confirmations with a fixed reply and recording calls
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub answer: bool,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Vec::new(),
        }
    }

    /// Take the calls recorded so far
    pub fn drain(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Host for RecordingHost {
    fn confirm(&mut self, message: &str) -> bool {
        self.calls.push(HostCall::Confirm(message.to_string()));
        self.answer
    }

    fn navigate(&mut self, href: &str) {
        self.calls.push(HostCall::Navigate(href.to_string()));
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        self.calls.push(HostCall::Copy(text.to_string()));
    }

    fn toast(&mut self, message: &str) {
        self.calls.push(HostCall::Toast(message.to_string()));
    }
}
