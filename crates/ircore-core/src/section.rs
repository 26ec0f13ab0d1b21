//! Intermediate unit the Prioritizer ranks and the Token Budgeter fits to
//! budget, before the Assembler partitions survivors into
//! [`crate::context_pack::ContextPackContent`]'s fixed buckets.

use serde::{Deserialize, Serialize};

/// Which `ContextPackContent` bucket a [`Section`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBucket {
    Memory,
    Knowledge,
    Realtime,
    AgentSpecific,
}

impl SectionBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionBucket::Memory => "memory",
            SectionBucket::Knowledge => "knowledge",
            SectionBucket::Realtime => "realtime",
            SectionBucket::AgentSpecific => "agent_specific",
        }
    }
}

/// One candidate content block flowing through prioritization and budget
/// enforcement. Usually backed by one [`crate::entry::Entry`], but the
/// executive summary / key insights / critical actions the Assembler
/// synthesizes are also represented this way so the Budgeter has one
/// uniform unit to compress, eliminate, or truncate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub bucket: SectionBucket,
    pub content: String,
    /// Composite score from the Prioritizer; higher
    /// sections survive eliminate/truncate passes longer.
    pub priority: f64,
    /// An essential section is never eliminated or truncated. The
    /// Budgeter may still compress it.
    pub essential: bool,
    /// Whitespace/idiom compression may be skipped for sections whose
    /// content is already maximally dense (e.g. a single code snippet).
    pub compressible: bool,
    pub token_count: usize,
}

impl Section {
    pub fn new(id: impl Into<String>, bucket: SectionBucket, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bucket,
            content: content.into(),
            priority: 0.0,
            essential: false,
            compressible: true,
            token_count: 0,
        }
    }
}
