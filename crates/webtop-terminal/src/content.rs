//! Static terminal content
//!
//! Help texts, fixed listings and the structured content blocks echoed by the
//! section commands.

use serde::{Deserialize, Serialize};

use crate::command::CommandContext;

/// Structured content block identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentId {
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
    Cv,
    Neofetch,
}

/// A renderable content block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBlock {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

impl ContentId {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentId::About => "about",
            ContentId::Skills => "skills",
            ContentId::Projects => "projects",
            ContentId::Experience => "experience",
            ContentId::Education => "education",
            ContentId::Contact => "contact",
            ContentId::Cv => "cv",
            ContentId::Neofetch => "neofetch",
        }
    }

    /// Look up the block body
    pub fn block(self) -> ContentBlock {
        match self {
            ContentId::About => ContentBlock {
                title: "About Me",
                lines: &[
                    "Software engineer building tools for the web and the terminal.",
                    "Based in Jakarta, Indonesia.",
                ],
            },
            ContentId::Skills => ContentBlock {
                title: "Skills",
                lines: &[
                    "Languages : Rust, TypeScript, Python, Go",
                    "Frontend  : HTML, CSS, React",
                    "Backend   : Node.js, PostgreSQL, Redis",
                    "Tooling   : Git, Docker, Linux",
                ],
            },
            ContentId::Projects => ContentBlock {
                title: "Projects",
                lines: &[
                    "portfolio-os : Desktop-style portfolio with a built-in terminal",
                    "task-tracker : Kanban board with offline sync",
                    "weather-cli  : Forecasts in your shell",
                ],
            },
            ContentId::Experience => ContentBlock {
                title: "Experience",
                lines: &[
                    "2022 - now  : Software Engineer",
                    "2020 - 2022 : Frontend Developer",
                ],
            },
            ContentId::Education => ContentBlock {
                title: "Education",
                lines: &["B.Sc. Computer Science"],
            },
            ContentId::Contact => ContentBlock {
                title: "Contact",
                lines: &[
                    "Email    : hello@example.com",
                    "GitHub   : github.com/abdi",
                    "LinkedIn : linkedin.com/in/abdi",
                ],
            },
            ContentId::Cv => ContentBlock {
                title: "Curriculum Vitae",
                lines: &["Run 'download cv' to get the PDF."],
            },
            ContentId::Neofetch => ContentBlock {
                title: "abdi@portfolio",
                lines: &[
                    "OS       : Ubuntu Portfolio Edition",
                    "Shell    : portfolio-sh",
                    "WM       : webtop",
                    "Terminal : webtop-terminal",
                    "Theme    : Yaru",
                ],
            },
        }
    }
}

pub const PROMPT: &str = "abdi@portfolio:~/portfolio$";

pub const PWD: &str = "/home/abdi/portfolio";

pub const LS_LISTING: &str = "Available sections:
📂 about/
📂 skills/
📂 projects/
📂 experience/
📂 education/
📂 contact/
📄 cv.pdf";

/// Shown when the settings window opens the terminal
pub const SETTINGS_WELCOME: &str = "Welcome to Ubuntu Settings
Type \"help\" to see available commands.

Popular commands:
- theme [light/dark]
- font [size]
- layout [grid/list]
- animations [on/off]";

const GLOBAL_HELP: &str = "Available commands:
- about     : Display information about me
- skills    : List my technical skills
- projects  : View my projects
- experience: Show work experience
- education : Display educational background
- contact   : Show contact information
- readme    : Download README file
- cv        : Download CV
- download  : Download a file (usage: download <cv|readme>)
- clear     : Clear the terminal
- neofetch  : Display system information
- ls        : List available sections
- pwd       : Show current directory

Keyboard shortcuts:
- Up/Down   : Navigate command history
- Ctrl+L    : Clear terminal
- Ctrl+C    : Cancel current command
- Tab       : Command auto-completion";

const SETTINGS_HELP: &str = "Settings Commands:
- theme [light/dark] : Change theme
- font [size]       : Change font size (12-20)
- layout [grid/list]: Change layout view
- animations [on/off]: Toggle animations
- clear     : Clear terminal
- exit      : Close settings

Keyboard shortcuts:
- Up/Down   : Navigate command history
- Ctrl+L    : Clear terminal
- Tab       : Command auto-completion";

const PROFILE_HELP: &str = "Profile Commands:
- edit [field] [value]: Edit profile info
- export    : Export profile data
- import    : Import profile data
- backup    : Create backup
- restore   : Restore from backup
- clear     : Clear terminal
- exit      : Close profile

Keyboard shortcuts:
- Up/Down   : Navigate command history
- Ctrl+L    : Clear terminal
- Tab       : Command auto-completion";

/// Context-sensitive help text
pub fn help_text(context: CommandContext) -> &'static str {
    match context {
        CommandContext::Global => GLOBAL_HELP,
        CommandContext::Settings => SETTINGS_HELP,
        CommandContext::Profile => PROFILE_HELP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_context_sensitive() {
        assert!(help_text(CommandContext::Global).starts_with("Available commands:"));
        assert!(help_text(CommandContext::Settings).starts_with("Settings Commands:"));
        assert!(help_text(CommandContext::Profile).starts_with("Profile Commands:"));
    }

    #[test]
    fn test_every_block_has_a_body() {
        for id in [
            ContentId::About,
            ContentId::Skills,
            ContentId::Projects,
            ContentId::Experience,
            ContentId::Education,
            ContentId::Contact,
            ContentId::Cv,
            ContentId::Neofetch,
        ] {
            let block = id.block();
            assert!(!block.title.is_empty(), "{} has no title", id.as_str());
            assert!(!block.lines.is_empty(), "{} has no lines", id.as_str());
        }
    }
}
