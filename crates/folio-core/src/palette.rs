//! Ctrl+K command palette.

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    /// DOM id scrolled into view.
    pub fn element_id(self) -> &'static str {
        match self {
            Section::About => "section-1",
            Section::Skills => "section-2",
            Section::Projects => "section-5",
            Section::Contact => "section-6",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ScrollTo(Section),
    SetTheme(Theme),
    StartGame,
}

/// Recognized tokens and what they do.
pub const COMMANDS: &[(&str, Command)] = &[
    ("/about", Command::ScrollTo(Section::About)),
    ("/skills", Command::ScrollTo(Section::Skills)),
    ("/projects", Command::ScrollTo(Section::Projects)),
    ("/contact", Command::ScrollTo(Section::Contact)),
    ("/cyberpunk", Command::SetTheme(Theme::Cyberpunk)),
    ("/matrix", Command::SetTheme(Theme::Matrix)),
    ("/minimalist", Command::SetTheme(Theme::Minimalist)),
    ("/game", Command::StartGame),
];

/// Chips shown while the input is empty.
pub const SUGGESTIONS: [&str; 3] = ["/matrix", "/minimalist", "/cyberpunk"];

pub fn parse(input: &str) -> Option<Command> {
    let token = input.trim().to_lowercase();
    COMMANDS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, cmd)| *cmd)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Run the command; the palette has closed and its input was cleared.
    Dispatch(Command),
    /// Show a transient "unknown command" notice.
    Unknown(String),
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct CommandPalette {
    open: bool,
    input: String,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The input starts empty on every open, matching the cleared field.
    pub fn open(&mut self) {
        self.open = true;
        self.input.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    /// Enter pressed.
    pub fn submit(&mut self) -> Outcome {
        if let Some(cmd) = parse(&self.input) {
            self.open = false;
            self.input.clear();
            return Outcome::Dispatch(cmd);
        }
        if self.input.trim_start().starts_with('/') {
            log::info!("[palette] unknown command {:?}", self.input);
            return Outcome::Unknown(format!("Unknown command: {}", self.input.trim()));
        }
        Outcome::Ignored
    }

    /// Suggestion chip clicked.
    pub fn choose(&mut self, token: &str) -> Outcome {
        match parse(token) {
            Some(cmd) => {
                self.open = false;
                self.input.clear();
                Outcome::Dispatch(cmd)
            }
            None => Outcome::Ignored,
        }
    }
}

/// The single pending hide of the palette's notice. Only the latest notice's
/// timeout may hide it.
#[derive(Debug, Default)]
pub struct NoticeTimer {
    generation: u32,
    timeout: Option<i32>,
}

impl NoticeTimer {
    /// A new notice is shown. Returns its generation and the previous
    /// timeout handle, which the caller cancels.
    pub fn show(&mut self) -> (u32, Option<i32>) {
        self.generation = self.generation.wrapping_add(1);
        (self.generation, self.timeout.take())
    }

    pub fn scheduled(&mut self, handle: i32) {
        self.timeout = Some(handle);
    }

    /// A hide timeout fired. True when it belongs to the notice on screen.
    pub fn expire(&mut self, generation: u32) -> bool {
        if generation != self.generation {
            return false;
        }
        self.timeout = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_and_space_insensitive() {
        assert_eq!(parse("  /MATRIX "), Some(Command::SetTheme(Theme::Matrix)));
        assert_eq!(parse("/game"), Some(Command::StartGame));
        assert_eq!(parse("matrix"), None);
    }

    #[test]
    fn suggestions_are_commands() {
        for s in SUGGESTIONS {
            assert!(parse(s).is_some(), "{s}");
        }
    }
}
