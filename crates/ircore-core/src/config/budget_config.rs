use serde::{Deserialize, Serialize};

use super::defaults;

/// Token-counting strategy (§4.8). `CodeAware` is the most accurate and is
/// the default; `Character` is the guaranteed-cheap fallback used when a
/// counting method itself fails (e.g. the exact tokenizer errors on
/// malformed input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCountingMethod {
    Character,
    Word,
    CodeAware,
}

impl TokenCountingMethod {
    /// Documented accuracy of each approximation relative to an exact
    /// tokenizer count, from spec.md §4.8.
    pub fn accuracy(self) -> f64 {
        match self {
            TokenCountingMethod::Character => 0.7,
            TokenCountingMethod::Word => 0.85,
            TokenCountingMethod::CodeAware => 0.95,
        }
    }
}

impl Default for TokenCountingMethod {
    fn default() -> Self {
        TokenCountingMethod::CodeAware
    }
}

/// Token Budgeter configuration: the pack's token budget, the headroom
/// reserved for the rendered template's own markup, and how many
/// compression levels (L0..Ln) the prioritizer may apply before falling
/// back to truncation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub default_token_budget: usize,
    pub reserved_headroom: usize,
    pub compression_levels: u8,
    pub allow_truncation: bool,
    pub counting_method: TokenCountingMethod,
    /// Sections truncated in the truncation stage keep this fraction of
    /// their original length (spec.md §4.8 step 5).
    pub truncation_retain_fraction: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_token_budget: defaults::DEFAULT_TOKEN_BUDGET,
            reserved_headroom: defaults::DEFAULT_RESERVED_HEADROOM,
            compression_levels: defaults::DEFAULT_COMPRESSION_LEVELS,
            allow_truncation: true,
            counting_method: TokenCountingMethod::default(),
            truncation_retain_fraction: 0.7,
        }
    }
}

impl BudgetConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.default_token_budget <= self.reserved_headroom {
            errors.push("budget.default_token_budget must exceed budget.reserved_headroom".to_string());
        }
        if self.compression_levels == 0 {
            errors.push("budget.compression_levels must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.truncation_retain_fraction) {
            errors.push("budget.truncation_retain_fraction must be within 0..=1".to_string());
        }
        errors
    }
}
