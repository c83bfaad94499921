use async_trait::async_trait;
use crate::error::Result;

/// A chat-completion backend taking one system and one user message.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
    fn model(&self) -> &str;
    fn name(&self) -> &str;
}
