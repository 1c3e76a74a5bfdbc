//! Terminal confirmations.
//!
//! Backed by `dialoguer` when the `interactive` feature is on; without it
//! every question is answered "no".

use std::io::IsTerminal;
use std::path::Path;

use hubgen_core::application::ports::OverwritePrompt;

/// Both stdin and stderr are terminals, so a question can be asked.
pub fn is_interactive() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Overwrite prompt that asks on the terminal.
pub fn overwrite_prompt() -> Box<dyn OverwritePrompt> {
    Box::new(|path: &Path| confirm(&format!("{} exists. Overwrite?", path.display())))
}

/// Ask a yes/no question; "no" on any terminal error.
#[cfg(feature = "interactive")]
pub fn confirm(question: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(not(feature = "interactive"))]
pub fn confirm(question: &str) -> bool {
    tracing::debug!(question, "interactive feature disabled; answering no");
    false
}
