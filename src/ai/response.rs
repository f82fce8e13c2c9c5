use crate::error::{Result, ShaiError};
use once_cell::sync::Lazy;
use regex::Regex;

/// 사전 컴파일된 코드 블록 정규표현식
static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(?:json)?\s*(.*?)\s*```$").unwrap()
});

/// AI 응답을 후처리하여 명령어 배열만 추출하는 공통 모듈
pub struct ResponseParser;

impl ResponseParser {
    /// AI 응답 본문을 명령어 목록으로 파싱
    ///
    /// 마크다운 코드 블록(```json ... ```)으로 감싸진 응답도 허용하며,
    /// 빈 배열 `[]`은 "안전하게 제안할 것이 없음"을 의미하는 정상 응답입니다.
    ///
    /// # Examples
    /// ```
    /// use shai::ai::response::ResponseParser;
    ///
    /// let commands = ResponseParser::parse("```json\n[\"ls -la\"]\n```").unwrap();
    /// assert_eq!(commands, vec!["ls -la"]);
    /// ```
    pub fn parse(content: &str) -> Result<Vec<String>> {
        let trimmed = content.trim();

        let body = if let Some(caps) = CODE_FENCE_REGEX.captures(trimmed) {
            caps.get(1).map_or("", |m| m.as_str())
        } else {
            trimmed
        };

        let commands: Vec<String> = serde_json::from_str(body).map_err(|e| {
            ShaiError::Generation(format!(
                "failed to parse commands from AI response: {}\nResponse: {}",
                e, body
            ))
        })?;

        Ok(commands)
    }
}
