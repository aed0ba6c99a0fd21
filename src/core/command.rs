/// A user request to the page controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Quit,
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parse a typed prompt answer by its first character: `n`, `b`/`p` or `q`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().chars().next()?.to_ascii_lowercase() {
            'n' => Some(Command::Next),
            'b' | 'p' => Some(Command::Prev),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}
