use crate::cli::{ConfigAction, ConfigField};
use crate::config::Config;
use crate::error::{Result, ShaiError};
use crate::ui;
use colored::*;
use dialoguer::{Confirm, Password};

/// config 서브커맨드 처리
pub fn run(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { field } => set(field),
        ConfigAction::Show => show(),
        ConfigAction::Reset => reset(),
    }
}

fn set(field: &ConfigField) -> Result<()> {
    let mut config = Config::load()?;

    match field {
        ConfigField::Url { url } => {
            config.ai_url = url.clone();
            config.save()?;
            ui::prompt::display_success("AI URL updated successfully");
        }
        ConfigField::Key => {
            let api_key = prompt_api_key()?;
            if api_key.is_empty() {
                return Err(ShaiError::Config("API key cannot be empty".to_string()));
            }
            config.api_key = api_key;
            config.save()?;
            ui::prompt::display_success("API key updated successfully");
        }
        ConfigField::Model { model } => {
            config.model = model.clone();
            config.save()?;
            ui::prompt::display_success("Model updated successfully");
        }
    }

    Ok(())
}

/// API 키 숨김 입력
pub fn prompt_api_key() -> Result<String> {
    let key = Password::new()
        .with_prompt("Enter API Key")
        .allow_empty_password(true)
        .interact()
        .map_err(|_| ShaiError::UserCancelled)?;
    Ok(key.trim().to_string())
}

fn show() -> Result<()> {
    let config = Config::load()?;

    if !config.is_configured() {
        ui::prompt::display_warning("Configuration is incomplete");
    }

    let not_set = || "(not set)".dimmed().to_string();

    let ai_url = if config.ai_url.is_empty() {
        not_set()
    } else {
        config.ai_url.clone()
    };
    let api_key = if config.api_key.is_empty() {
        not_set()
    } else {
        config.masked_api_key()
    };
    let model = if config.model.is_empty() {
        not_set()
    } else {
        config.model.clone()
    };

    println!();
    println!("{}", "Configuration".magenta().bold());
    println!("  {} {}", "AI URL: ".dimmed(), ai_url);
    println!("  {} {}", "API Key:".dimmed(), api_key);
    println!("  {} {}", "Model:  ".dimmed(), model);
    println!();

    Ok(())
}

fn reset() -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt("Are you sure you want to reset all configuration?")
        .default(false)
        .interact()
        .unwrap_or(false);

    if !confirmed {
        ui::prompt::display_warning("Reset cancelled.");
        return Ok(());
    }

    Config::reset()?;
    ui::prompt::display_success("Configuration reset successfully");
    Ok(())
}
