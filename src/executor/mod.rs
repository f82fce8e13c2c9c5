pub mod batch;
pub mod shell;

// Re-exports for convenience (used in commands and review modules)
pub use batch::{BatchRunner, CancelFlag, ContinuePrompt, ExecutionOutcome};
pub use shell::{detect_shell, ExecOutput, ShellAdapter, SystemShell};
