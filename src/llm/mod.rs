pub mod provider;
pub mod openai;
pub mod prompts;
pub mod parser;

pub use provider::ChatProvider;
pub use openai::OpenAIProvider;
pub use prompts::{build_user_prompt, SYSTEM_PROMPT};
pub use parser::{extract_json, parse_llm_response};
