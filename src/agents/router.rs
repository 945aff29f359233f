//! Supervisor routing: query → specialist role.

use std::sync::Arc;

use crate::domain::{AgentLog, AgentRole, LogStep};
use crate::llm::{Generator, ModelTier, SYSTEM_ERROR_PREFIX};

use super::ProgressSink;

/// Outcome of one routing decision, with the audit steps it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub agent: AgentRole,
    pub logs: Vec<AgentLog>,
}

/// Maps a free-text query to exactly one specialist role.
///
/// Two states: FORCED (caller supplies a non-supervisor role; no
/// classification call is made) and AUTO (one fast-tier classification call,
/// parsed through the total mapping on [`AgentRole`]). Classification failure
/// is never fatal; it falls back to GUARDIAN with an ERROR audit step.
#[derive(Clone)]
pub struct Supervisor {
    generator: Arc<dyn Generator>,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor").finish()
    }
}

impl Supervisor {
    #[must_use]
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Resolve the specialist for `query`, honoring a forced role.
    pub async fn resolve(
        &self,
        query: &str,
        forced: Option<AgentRole>,
        progress: Option<&ProgressSink>,
    ) -> RoutingDecision {
        let mut logs = Vec::new();

        if let Some(agent) = forced.filter(|a| *a != AgentRole::Supervisor) {
            logs.push(AgentLog::new(
                LogStep::ManualOverride,
                AgentRole::Supervisor,
                format!("Operator forced control to: {agent}"),
            ));
            if let Some(p) = progress {
                p(AgentRole::Supervisor, "Manual override active");
            }
            return RoutingDecision { agent, logs };
        }

        if let Some(p) = progress {
            p(AgentRole::Supervisor, "Analyzing intent...");
        }
        logs.push(AgentLog::new(
            LogStep::IntentAnalysis,
            AgentRole::Supervisor,
            "Supervisor analyzing query intent...",
        ));

        let prompt = format!(
            "Query: \"{query}\". Who handles this? GUARDIAN (Brand), GROWTH (Marketing), \
             ARCHITECT (Tech). Reply ONE word."
        );
        let reply = self.generator.generate(ModelTier::Fast, &prompt).await;

        let agent = if reply.starts_with(SYSTEM_ERROR_PREFIX) {
            tracing::warn!(name: "supervisor.fallback", "Classification call degraded");
            logs.push(AgentLog::new(
                LogStep::Error,
                AgentRole::Supervisor,
                "Supervisor unreachable. Defaulting to Guardian.",
            ));
            AgentRole::Guardian
        } else {
            let agent = AgentRole::from_classifier_reply(&reply);
            logs.push(AgentLog::new(
                LogStep::Delegation,
                AgentRole::Supervisor,
                format!("Intent detected. Delegating to: {agent}"),
            ));
            if let Some(p) = progress {
                p(AgentRole::Supervisor, &format!("Delegated to {agent}"));
            }
            agent
        };

        RoutingDecision { agent, logs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator returning a canned reply and counting invocations.
    struct CountingGenerator {
        reply: String,
        calls: AtomicUsize,
    }

    impl CountingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Generator for CountingGenerator {
        async fn generate(&self, _tier: ModelTier, _prompt: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn forced_role_skips_classification() {
        let generator = Arc::new(CountingGenerator::new("ARCHITECT"));
        let supervisor = Supervisor::new(Arc::clone(&generator) as Arc<dyn Generator>);

        let decision = supervisor
            .resolve("anything", Some(AgentRole::Growth), None)
            .await;

        assert_eq!(decision.agent, AgentRole::Growth);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(decision.logs.len(), 1);
        assert_eq!(decision.logs[0].step, LogStep::ManualOverride);
    }

    #[tokio::test]
    async fn forced_supervisor_is_not_honored() {
        let generator = Arc::new(CountingGenerator::new("GROWTH"));
        let supervisor = Supervisor::new(Arc::clone(&generator) as Arc<dyn Generator>);

        let decision = supervisor
            .resolve("write me an ad", Some(AgentRole::Supervisor), None)
            .await;

        // SUPERVISOR never answers queries; the override is ignored and
        // normal classification runs.
        assert_eq!(decision.agent, AgentRole::Growth);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_to_guardian() {
        let generator = Arc::new(CountingGenerator::new("BANANA"));
        let supervisor = Supervisor::new(generator as Arc<dyn Generator>);

        let decision = supervisor.resolve("who are you", None, None).await;
        assert_eq!(decision.agent, AgentRole::Guardian);
        assert_eq!(decision.logs.last().unwrap().step, LogStep::Delegation);
    }

    #[tokio::test]
    async fn degraded_classifier_logs_error_and_defaults() {
        let generator = Arc::new(CountingGenerator::new(
            "[SYSTEM ERROR]: Could not generate response using model gemini-2.5-flash.",
        ));
        let supervisor = Supervisor::new(generator as Arc<dyn Generator>);

        let decision = supervisor.resolve("tell me about yield", None, None).await;
        assert_eq!(decision.agent, AgentRole::Guardian);
        assert_eq!(decision.logs.last().unwrap().step, LogStep::Error);
    }
}
