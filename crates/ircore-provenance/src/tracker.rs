//! Session-scoped provenance tracking (§4.9). One session spans a single
//! assembly: `start_session` opens it, `register_source`/`record_decision`
//! accumulate evidence as the pipeline runs, `generate` folds everything
//! into a [`ProvenanceInfo`] for the finished pack, and `end_session`
//! drops the bookkeeping.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ircore_core::confidence::Confidence;
use ircore_core::errors::{IrError, IrResult};
use ircore_core::provenance::{Decision, ProvenanceEntry, ProvenanceInfo};
use serde_json::Value;
use uuid::Uuid;

use crate::source::{kind_to_contribution, resolve_trust, SourceRegistration};

struct Session {
    pack_id: String,
    sources: Vec<SourceRegistration>,
    decisions: Vec<Decision>,
    #[allow(dead_code)]
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

/// Tracks provenance for every in-flight (and recently finished) assembly
/// session. Cheap to clone: the map is the only state and is reference
/// counted internally via `Arc` inside `DashMap`.
#[derive(Default)]
pub struct ProvenanceTracker {
    sessions: DashMap<String, Session>,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session for `pack_id`, returning an opaque session id.
    pub fn start_session(&self, pack_id: impl Into<String>) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            Session {
                pack_id: pack_id.into(),
                sources: Vec::new(),
                decisions: Vec::new(),
                started_at: Utc::now(),
                ended_at: None,
            },
        );
        session_id
    }

    /// Record that `kind` (e.g. `"memory"`, `"fts"`, `"retriever"`)
    /// contributed to the session under construction.
    pub fn register_source(
        &self,
        session_id: &str,
        kind: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        params: Value,
    ) -> IrResult<()> {
        let kind = kind.into();
        let trust = resolve_trust(&kind, &params);
        let mut session = self.session_mut(session_id)?;
        session.sources.push(SourceRegistration {
            kind,
            label: label.into(),
            description: description.into(),
            params,
            trust,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Record a choice made while assembling the pack, e.g. which
    /// retrieval strategy or fusion algorithm was used and why.
    #[allow(clippy::too_many_arguments)]
    pub fn record_decision(
        &self,
        session_id: &str,
        title: impl Into<String>,
        summary: impl Into<String>,
        reasoning: impl Into<String>,
        alternatives: Vec<String>,
        confidence: f64,
    ) -> IrResult<()> {
        let mut session = self.session_mut(session_id)?;
        session.decisions.push(Decision {
            title: title.into(),
            summary: summary.into(),
            reasoning: reasoning.into(),
            alternatives,
            confidence: Confidence::new(confidence),
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    /// Mark a session as finished. Its data is retained until dropped
    /// explicitly via [`Self::drop_session`] so `generate` can still be
    /// called after `end_session`.
    pub fn end_session(&self, session_id: &str) -> IrResult<()> {
        let mut session = self.session_mut(session_id)?;
        session.ended_at = Some(Utc::now());
        Ok(())
    }

    /// Fold the session's registered sources and decisions into a
    /// [`ProvenanceInfo`] ready to attach to a [`ircore_core::context_pack::ContextPack`].
    pub fn generate(&self, session_id: &str) -> IrResult<ProvenanceInfo> {
        let session = self.session_ref(session_id)?;
        let mut info = ProvenanceInfo::default();

        for source in &session.sources {
            info.push(ProvenanceEntry {
                entry_id: format!("{}:{}", source.kind, source.label),
                source_path: source.label.clone(),
                contribution: kind_to_contribution(&source.kind),
                strategy: source.kind.clone(),
                score: source.trust.value(),
                trust: source.trust,
                included_at: source.registered_at,
                compression_level: 0,
                reasons: vec![source.description.clone()],
            });
        }

        for decision in &session.decisions {
            info.push_decision(decision.clone());
        }

        Ok(info)
    }

    /// Remove a session's bookkeeping entirely, e.g. once its
    /// [`ProvenanceInfo`] has been generated and attached to a pack.
    pub fn drop_session(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn pack_id(&self, session_id: &str) -> IrResult<String> {
        Ok(self.session_ref(session_id)?.pack_id.clone())
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.ended_at.is_none()).count()
    }

    fn session_mut(&self, session_id: &str) -> IrResult<dashmap::mapref::one::RefMut<'_, String, Session>> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| IrError::NotInitialized { component: format!("provenance session {session_id}") })
    }

    fn session_ref(&self, session_id: &str) -> IrResult<dashmap::mapref::one::Ref<'_, String, Session>> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| IrError::NotInitialized { component: format!("provenance session {session_id}") })
    }
}
