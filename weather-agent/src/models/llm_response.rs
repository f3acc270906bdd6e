//! LLM response and token usage types.

use serde::{Deserialize, Serialize};

use crate::models::content::Content;

/// Token accounting reported by an LLM provider for one generation call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

impl TokenUsage {
    /// Usage with no information, for providers or fakes that report none.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Usage from whatever fields the provider reported.
    #[must_use]
    pub fn partial(
        input_tokens: Option<u32>,
        output_tokens: Option<u32>,
        total_tokens: Option<u32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }

    #[must_use]
    pub fn input_tokens(&self) -> u32 {
        self.input_tokens.unwrap_or(0)
    }

    #[must_use]
    pub fn output_tokens(&self) -> u32 {
        self.output_tokens.unwrap_or(0)
    }

    /// Total tokens; derived from input + output when the provider omits it.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
            .unwrap_or_else(|| self.input_tokens() + self.output_tokens())
    }
}

/// The result of one LLM generation call: the produced content plus usage.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    content: Content,
    usage: TokenUsage,
}

impl LlmResponse {
    pub fn new(content: Content, usage: TokenUsage) -> Self {
        Self { content, usage }
    }

    /// Returns a reference to the generated content.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Consumes the response and returns the generated content.
    #[must_use]
    pub fn into_content(self) -> Content {
        self.content
    }

    /// Returns the token usage for this call.
    #[must_use]
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_tokens_fall_back_to_sum() {
        let usage = TokenUsage::partial(Some(10), Some(5), None);
        assert_eq!(usage.total_tokens(), 15);

        let usage = TokenUsage::partial(Some(10), Some(5), Some(20));
        assert_eq!(usage.total_tokens(), 20);

        assert_eq!(TokenUsage::empty().total_tokens(), 0);
    }
}
