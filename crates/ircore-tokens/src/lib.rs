//! # ircore-tokens
//!
//! Token counting for the Token Budgeter. Three
//! approximation methods (character, word, code-aware) plus an exact
//! `tiktoken-rs` count, the latter cached by content hash since the same
//! section body is frequently re-counted across budgeter retries.

pub mod methods;

use blake3::Hasher;
use ircore_core::config::TokenCountingMethod;
use moka::sync::Cache;
use tiktoken_rs::CoreBPE;

/// Counts tokens using the configured approximation, with an exact
/// `tiktoken` count available via [`TokenCounter::count_exact`] and cached
/// by content hash.
pub struct TokenCounter {
    bpe: CoreBPE,
    exact_cache: Cache<[u8; 32], usize>,
}

impl TokenCounter {
    /// Build a counter using the `cl100k_base` encoding (GPT-4 family),
    /// the encoding the teacher's retrieval pack pins for token accounting.
    pub fn new() -> Self {
        Self {
            bpe: tiktoken_rs::cl100k_base().expect("cl100k_base ranks are bundled with tiktoken-rs"),
            exact_cache: Cache::builder().max_capacity(10_000).build(),
        }
    }

    /// Approximate token count using the given method. Falls back to character
    /// counting if a method-specific computation is not representable
    /// (never happens for the pure-arithmetic methods here, but kept as
    /// the documented contract so a future method with a fallible step
    /// has somewhere to fall back to).
    pub fn count(&self, text: &str, method: TokenCountingMethod) -> usize {
        match method {
            TokenCountingMethod::Character => methods::character_count(text),
            TokenCountingMethod::Word => methods::word_count(text),
            TokenCountingMethod::CodeAware => methods::code_aware_count(text),
        }
    }

    /// Exact token count via `tiktoken`, cached by the blake3 hash of
    /// `text` so repeated budgeter passes over the same section body
    /// don't re-tokenize it.
    pub fn count_exact(&self, text: &str) -> usize {
        let key = *Hasher::new().update(text.as_bytes()).finalize().as_bytes();
        if let Some(cached) = self.exact_cache.get(&key) {
            return cached;
        }
        let count = self.bpe.encode_with_special_tokens(text).len();
        self.exact_cache.insert(key, count);
        count
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_count_is_cached() {
        let counter = TokenCounter::new();
        let text = "the quick brown fox jumps over the lazy dog";
        let first = counter.count_exact(text);
        let second = counter.count_exact(text);
        assert_eq!(first, second);
        assert!(first > 0);
    }

    #[test]
    fn empty_text_counts_zero() {
        let counter = TokenCounter::new();
        assert_eq!(counter.count_exact(""), 0);
        assert_eq!(counter.count("", TokenCountingMethod::Character), 0);
    }
}
