use crate::error::{Result, ShaiError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// shai 사용자 설정
///
/// 설정 파일은 ~/.shai/config.toml에 저장됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// AI API 엔드포인트 URL (OpenAI 호환 chat completions)
    #[serde(default)]
    pub ai_url: String,

    /// API 인증 키
    #[serde(default)]
    pub api_key: String,

    /// 사용할 모델 이름
    #[serde(default)]
    pub model: String,
}

impl Config {
    /// 설정 파일 경로 가져오기
    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// 설정 디렉토리 경로
    fn config_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".shai")
    }

    /// 설정 파일에서 로드 (없으면 기본값 사용)
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ShaiError::Config(format!("failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// 설정을 파일에 저장
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ShaiError::Config(format!("failed to serialize config: {}", e)))?;

        fs::write(Self::config_path(), toml_string)?;

        Ok(())
    }

    /// 설정 파일 삭제 (없으면 무시)
    pub fn reset() -> Result<()> {
        let config_path = Self::config_path();
        if config_path.exists() {
            fs::remove_file(config_path)?;
        }
        Ok(())
    }

    /// 리뷰 세션 진입에 필요한 값이 모두 설정되었는지 확인
    pub fn is_configured(&self) -> bool {
        !self.ai_url.is_empty() && !self.api_key.is_empty() && !self.model.is_empty()
    }

    /// API 키 마스킹 (앞 4자리와 뒤 4자리만 노출)
    pub fn masked_api_key(&self) -> String {
        if self.api_key.len() <= 8 {
            return "*".repeat(self.api_key.len());
        }
        format!(
            "{}{}{}",
            &self.api_key[..4],
            "*".repeat(self.api_key.len() - 8),
            &self.api_key[self.api_key.len() - 4..]
        )
    }
}
