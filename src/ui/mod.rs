pub mod progress;
pub mod prompt;
pub mod select;

pub use progress::create_spinner;
pub use prompt::TerminalContinuePrompt;
pub use select::TerminalSelector;
