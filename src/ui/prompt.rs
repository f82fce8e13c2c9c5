use crate::executor::ContinuePrompt;
use crate::safety::RiskLevel;
use colored::*;
use dialoguer::Confirm;

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "i".cyan(), message);
}

/// 명령어 출력 표시 (stdout은 흐리게, stderr은 빨간색)
pub fn display_output(output: &str, is_error: bool) {
    if output.is_empty() {
        return;
    }

    if is_error {
        eprintln!("{}", output.red());
    } else {
        println!("{}", output.dimmed());
    }
}

pub fn risk_label(risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::Safe => "safe".green(),
        RiskLevel::Caution => "caution".yellow(),
        RiskLevel::Danger => "danger".red().bold(),
    }
}

/// 위험도에 따라 명령어 텍스트에 색 입히기
pub fn risk_colored(command: &str, risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::Safe => command.green(),
        RiskLevel::Caution => command.yellow(),
        RiskLevel::Danger => command.red().bold(),
    }
}

/// dialoguer 기반 계속/중단 확인
pub struct TerminalContinuePrompt;

impl ContinuePrompt for TerminalContinuePrompt {
    fn confirm_continue(&self, message: &str) -> bool {
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}
