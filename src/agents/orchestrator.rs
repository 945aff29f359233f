//! End-to-end handling of one user query.
//!
//! One orchestration run is strictly sequential: resolve the role, retrieve
//! scoped context, assemble the prompt, generate. The run produces exactly
//! one answer and one ordered audit log; the orchestrator persists nothing
//! itself.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::{AgentLog, AgentRole, ChatMessage, ChatRole, Document, LogStep};
use crate::llm::{Generator, ModelTier};
use crate::search::SearchEngine;

use super::{ProgressSink, Supervisor, persona};

/// Returned answer when the provider produced nothing at all.
const MALFUNCTION_FALLBACK: &str = "Agent malfunction.";

/// The result of one orchestration run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AgentReply {
    /// Answer text; degraded diagnostics are returned here as-is.
    pub text: String,
    /// The specialist that answered.
    pub agent: AgentRole,
    /// Retrieved documents, for citation display.
    pub context: Vec<Document>,
    /// Full ordered audit trail of the run.
    pub logs: Vec<AgentLog>,
}

/// Composes router, scoped search, personas and history into one generation
/// call.
#[derive(Clone)]
pub struct Orchestrator {
    supervisor: Supervisor,
    search: SearchEngine,
    generator: Arc<dyn Generator>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("search", &self.search)
            .finish()
    }
}

impl Orchestrator {
    #[must_use]
    pub fn new(supervisor: Supervisor, search: SearchEngine, generator: Arc<dyn Generator>) -> Self {
        Self {
            supervisor,
            search,
            generator,
        }
    }

    /// Run the full pipeline for one query.
    ///
    /// `history` is a read-only trailing slice of the conversation; only the
    /// policy window (last 6 by default) is included in the prompt.
    /// `progress` is observational only.
    pub async fn run(
        &self,
        query: &str,
        forced: Option<AgentRole>,
        history: &[ChatMessage],
        progress: Option<&ProgressSink>,
    ) -> AgentReply {
        let started = Instant::now();

        // Step 1: agent selection.
        let decision = self.supervisor.resolve(query, forced, progress).await;
        let agent = decision.agent;
        let mut logs = decision.logs;

        // Step 2: scoped context retrieval.
        let allowed = agent.memory_access();
        let folders = if allowed.is_empty() {
            "GLOBAL".to_string()
        } else {
            allowed
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        if let Some(p) = progress {
            p(agent, &format!("{agent} searching memory..."));
        }
        logs.push(AgentLog::new(
            LogStep::MemoryAccess,
            agent,
            format!("Agent {agent} querying Neural Folders: {folders}..."),
        ));

        let context = self
            .search
            .search(query, self.search.policy().max_results, allowed)
            .await;

        if context.is_empty() {
            logs.push(AgentLog::new(
                LogStep::MemoryMiss,
                agent,
                format!("No relevant documents found in folders: {folders}"),
            ));
        } else {
            let titles = context
                .iter()
                .map(|d| d.metadata.title.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            logs.push(AgentLog::new(
                LogStep::Citation,
                agent,
                format!("Found {} references: {titles}", context.len()),
            ));
        }

        // Step 3: specialist generation with history and context.
        if let Some(p) = progress {
            p(agent, &format!("{agent} generating response..."));
        }

        let prompt = self.build_prompt(agent, query, history, &context, &folders);
        let text = self.generator.generate(ModelTier::Smart, &prompt).await;

        logs.push(AgentLog::new(
            LogStep::ExecutionComplete,
            agent,
            format!("Response generated in {}ms", started.elapsed().as_millis()),
        ));
        if let Some(p) = progress {
            p(agent, "Complete");
        }

        AgentReply {
            text: if text.is_empty() {
                MALFUNCTION_FALLBACK.to_string()
            } else {
                text
            },
            agent,
            context,
            logs,
        }
    }

    fn build_prompt(
        &self,
        agent: AgentRole,
        query: &str,
        history: &[ChatMessage],
        context: &[Document],
        folders: &str,
    ) -> String {
        let window = self.search.policy().history_window;

        let history_text = if history.is_empty() {
            "No previous context.".to_string()
        } else {
            let start = history.len().saturating_sub(window);
            history[start..]
                .iter()
                .map(|msg| match msg.role {
                    ChatRole::User => format!("USER: {}", msg.content),
                    ChatRole::Assistant => format!(
                        "ASSISTANT ({}): {}",
                        msg.agent.map_or("SYSTEM", AgentRole::as_str),
                        msg.content
                    ),
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        let context_text = context
            .iter()
            .map(|d| {
                format!(
                    "[SOURCE: {} - {}]\n{}",
                    d.scope(),
                    d.metadata.title,
                    d.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"{persona}

CONVERSATION HISTORY (Last 3 exchanges):
{history_text}

CONTEXT FROM NEURAL DATABASE ({folders}):
{context_text}

CURRENT USER COMMAND:
"{query}"

INSTRUCTIONS:
- Consider the conversation history for continuity
- Answer strictly based on the Context provided
- Maintain your Persona perfectly
- If context is missing, state clearly "Information not found in Knowledge Base""#,
            persona = persona(agent),
        )
    }
}
