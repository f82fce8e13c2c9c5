use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shai")]
#[command(version)]
#[command(about = "Convert natural language to shell commands", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// 자연어 질의 (예: shai "find all pdf files larger than 10MB")
    pub query: Vec<String>,

    /// 디버그 모드
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage shai configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Set configuration values
    Set {
        #[command(subcommand)]
        field: ConfigField,
    },
    /// Show current configuration (API key is masked)
    Show,
    /// Reset all configuration
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ConfigField {
    /// Set the AI API endpoint URL (e.g. https://openrouter.ai/api/v1/chat/completions)
    Url { url: String },
    /// Set the API key (input is hidden)
    Key,
    /// Set the AI model (e.g. anthropic/claude-3.5-sonnet)
    Model { model: String },
}

impl Cli {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}
