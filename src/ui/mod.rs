//! Presentation primitives shared by every page

pub mod footer;
pub mod navbar;
pub mod prompt;

pub use navbar::{NavLink, Navbar};
pub use prompt::{Prompt, TerminalPrompt};
