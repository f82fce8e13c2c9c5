pub mod client;
pub mod prompt_template;
pub mod response;

use crate::error::Result;
use async_trait::async_trait;

pub use client::AiClient;

/// 명령어 생성 collaborator trait
///
/// 리뷰 루프가 mock으로 테스트 가능하도록 seam을 제공합니다.
#[async_trait]
pub trait CommandGenerator: Send + Sync {
    /// Generate an ordered list of shell commands for a natural language query.
    ///
    /// An empty list is a valid "nothing safe to suggest" response, not an error.
    async fn generate(&self, query: &str, shell: &str) -> Result<Vec<String>>;
}
