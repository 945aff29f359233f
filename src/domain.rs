//! Core domain types: documents, neural folders, agent roles, audit logs and
//! chat messages.
//!
//! Everything here is plain data with serde derives; wire casing follows the
//! persisted snapshot and API payload formats (SCREAMING_SNAKE_CASE labels,
//! camelCase metadata keys).

use serde::{Deserialize, Serialize};

/// Provenance of a document: how it entered the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Curated knowledge, including the core-memory seed set.
    Knowledge,
    /// Synced from the task board.
    Task,
    /// Synced from campaign briefings.
    Briefing,
    /// Ingested from an uploaded file.
    File,
}

/// A permission scope over knowledge ("neural folder").
///
/// The well-known folders are closed variants; anything else round-trips
/// through [`KnowledgeCategory::Other`] so unknown labels in persisted data
/// are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnowledgeCategory {
    CoreIdentity,
    TechDocs,
    MarketingOps,
    General,
    #[serde(untagged)]
    Other(String),
}

impl KnowledgeCategory {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::CoreIdentity => "CORE_IDENTITY",
            Self::TechDocs => "TECH_DOCS",
            Self::MarketingOps => "MARKETING_OPS",
            Self::General => "GENERAL",
            Self::Other(label) => label,
        }
    }

    /// Total parse: unknown labels become [`KnowledgeCategory::Other`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "CORE_IDENTITY" => Self::CoreIdentity,
            "TECH_DOCS" => Self::TechDocs,
            "MARKETING_OPS" => Self::MarketingOps,
            "GENERAL" => Self::General,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for KnowledgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata carried alongside document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    /// Identifier of the source record this document was derived from.
    #[serde(rename = "originalId")]
    pub original_id: String,
    /// Folder the document belongs to; absent means unscoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<KnowledgeCategory>,
    /// Free-form source status (task state, briefing phase).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A document as submitted for ingestion; the embedding is always computed
/// server-side, never accepted from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub id: String,
    #[serde(rename = "kind", alias = "type")]
    pub kind: DocumentKind,
    pub content: String,
    pub metadata: DocumentMeta,
}

/// A stored document, embedding included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(rename = "kind", alias = "type")]
    pub kind: DocumentKind,
    pub content: String,
    pub metadata: DocumentMeta,
    /// Empty when the content could not be embedded; such documents are
    /// enumerable but invisible to similarity search.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl Document {
    /// The folder this document is scoped under; uncategorized documents
    /// fall into GENERAL for search scoping purposes.
    #[must_use]
    pub fn scope(&self) -> KnowledgeCategory {
        self.metadata
            .category
            .clone()
            .unwrap_or(KnowledgeCategory::General)
    }
}

/// The fixed agent team. SUPERVISOR only routes; it never answers queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    Supervisor,
    Guardian,
    Growth,
    Architect,
}

impl AgentRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supervisor => "SUPERVISOR",
            Self::Guardian => "GUARDIAN",
            Self::Growth => "GROWTH",
            Self::Architect => "ARCHITECT",
        }
    }

    /// Map a free-text classifier reply to a specialist.
    ///
    /// Total by construction: substring match on GROWTH, then ARCHITECT,
    /// and GUARDIAN absorbs everything else. Never yields SUPERVISOR.
    #[must_use]
    pub fn from_classifier_reply(reply: &str) -> Self {
        let upper = reply.to_uppercase();
        if upper.contains("GROWTH") {
            Self::Growth
        } else if upper.contains("ARCHITECT") {
            Self::Architect
        } else {
            Self::Guardian
        }
    }

    /// The neural folders this role is allowed to read.
    ///
    /// An empty list means unrestricted (GLOBAL) access.
    #[must_use]
    pub fn memory_access(self) -> &'static [KnowledgeCategory] {
        match self {
            Self::Supervisor => &[],
            Self::Guardian => &[KnowledgeCategory::CoreIdentity],
            Self::Growth => &[
                KnowledgeCategory::MarketingOps,
                KnowledgeCategory::CoreIdentity,
            ],
            Self::Architect => &[
                KnowledgeCategory::TechDocs,
                KnowledgeCategory::CoreIdentity,
            ],
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of step recorded in the per-run audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStep {
    ManualOverride,
    IntentAnalysis,
    Delegation,
    MemoryAccess,
    Citation,
    MemoryMiss,
    ExecutionComplete,
    Error,
}

/// One entry in the audit trail of an orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLog {
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub step: LogStep,
    pub agent: AgentRole,
    pub details: String,
}

impl AgentLog {
    #[must_use]
    pub fn new(step: LogStep, agent: AgentRole, details: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            step,
            agent,
            details: details.into(),
        }
    }
}

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// The specialist that produced an assistant message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentRole>,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            agent: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>, agent: AgentRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            agent: Some(agent),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_reply_prefers_growth_over_architect() {
        assert_eq!(
            AgentRole::from_classifier_reply("GROWTH or maybe ARCHITECT"),
            AgentRole::Growth
        );
        assert_eq!(
            AgentRole::from_classifier_reply("architect"),
            AgentRole::Architect
        );
    }

    #[test]
    fn classifier_reply_defaults_to_guardian() {
        assert_eq!(AgentRole::from_classifier_reply(""), AgentRole::Guardian);
        assert_eq!(
            AgentRole::from_classifier_reply("BANANA"),
            AgentRole::Guardian
        );
        assert_eq!(
            AgentRole::from_classifier_reply("GUARDIAN"),
            AgentRole::Guardian
        );
    }

    #[test]
    fn supervisor_has_no_folder_restrictions() {
        assert!(AgentRole::Supervisor.memory_access().is_empty());
        assert_eq!(
            AgentRole::Growth.memory_access(),
            &[
                KnowledgeCategory::MarketingOps,
                KnowledgeCategory::CoreIdentity
            ]
        );
    }

    #[test]
    fn unknown_category_label_round_trips() {
        let cat = KnowledgeCategory::parse("LEGAL_DOCS");
        assert_eq!(cat, KnowledgeCategory::Other("LEGAL_DOCS".to_string()));
        assert_eq!(cat.as_str(), "LEGAL_DOCS");

        let json = serde_json::to_string(&cat).unwrap();
        assert_eq!(json, "\"LEGAL_DOCS\"");
        let back: KnowledgeCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cat);
    }

    #[test]
    fn uncategorized_document_scopes_as_general() {
        let doc = Document {
            id: "d".to_string(),
            kind: DocumentKind::Knowledge,
            content: "text".to_string(),
            metadata: DocumentMeta {
                title: "t".to_string(),
                original_id: "o".to_string(),
                category: None,
                status: None,
            },
            embedding: Vec::new(),
        };
        assert_eq!(doc.scope(), KnowledgeCategory::General);
    }
}
