use crate::ai::AiClient;
use crate::commands::config::prompt_api_key;
use crate::config::Config;
use crate::error::{Result, ShaiError};
use crate::executor::{detect_shell, BatchRunner, CancelFlag, SystemShell};
use crate::review::ReviewSession;
use crate::ui;
use dialoguer::Input;
use std::sync::Arc;

/// 자연어 질의 처리: 설정 확인 → 리뷰 세션 실행
pub async fn run(query: &str) -> Result<()> {
    let mut config = Config::load()?;

    if !config.is_configured() {
        run_first_time_setup(&mut config)?;
    }

    let shell = detect_shell();
    let generator = Arc::new(AiClient::new(&config.ai_url, &config.api_key, &config.model)?);

    // ctrl-c는 명령어 경계에서만 반영되는 협조적 취소 신호로 처리
    let cancel = CancelFlag::new();
    let signal_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_flag.cancel();
        }
    });

    let runner = BatchRunner::new(
        Arc::new(SystemShell::new(&shell)),
        Box::new(ui::TerminalContinuePrompt),
        cancel,
    );

    let mut session = ReviewSession::new(
        generator,
        &shell,
        Box::new(ui::TerminalSelector::new()),
        runner,
    );

    session.run(query).await
}

/// 최초 실행 시 설정 마법사
fn run_first_time_setup(config: &mut Config) -> Result<()> {
    ui::prompt::display_info("First run: let's set up your AI provider.");

    let ai_url: String = Input::new()
        .with_prompt("AI API URL (e.g. https://openrouter.ai/api/v1/chat/completions)")
        .interact_text()
        .map_err(|_| ShaiError::UserCancelled)?;
    if ai_url.trim().is_empty() {
        return Err(ShaiError::Config("AI URL is required".to_string()));
    }
    config.ai_url = ai_url.trim().to_string();

    let api_key = prompt_api_key()?;
    if api_key.is_empty() {
        return Err(ShaiError::Config("API key is required".to_string()));
    }
    config.api_key = api_key;

    let model: String = Input::new()
        .with_prompt("Model name (e.g. anthropic/claude-3.5-sonnet)")
        .interact_text()
        .map_err(|_| ShaiError::UserCancelled)?;
    if model.trim().is_empty() {
        return Err(ShaiError::Config("model name is required".to_string()));
    }
    config.model = model.trim().to_string();

    config.save()?;

    println!();
    ui::prompt::display_success("Configuration saved!");
    println!();

    Ok(())
}
