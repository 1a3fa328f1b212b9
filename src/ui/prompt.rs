//! User interaction: confirmations, alerts and free-text input

use std::io::{self, BufRead, Write};

/// Modal interactions a page may need while running an action
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question; `false` means the user backed out
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);

    /// Ask for a line of text; `None` when the user cancels
    fn input(&self, message: &str) -> Option<String>;
}

/// Prompt over stdin/stdout
#[derive(Debug, Default, Clone)]
pub struct TerminalPrompt {
    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        println!("{}", message);
        if self.assume_yes {
            println!("[y/N] y");
            return true;
        }
        print!("[y/N] ");
        let _ = io::stdout().flush();

        self.read_line()
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        println!("{}", message);
    }

    fn input(&self, message: &str) -> Option<String> {
        print!("{} ", message);
        let _ = io::stdout().flush();
        self.read_line().filter(|line| !line.is_empty())
    }
}
