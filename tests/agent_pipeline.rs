//! End-to-end orchestration tests over a bootstrapped store.

mod common;

use std::sync::{Arc, Mutex};

use common::{KeywordEmbedder, ScriptedGenerator};
use poolpays_hub::agents::{Orchestrator, Supervisor};
use poolpays_hub::domain::{AgentRole, ChatMessage, LogStep};
use poolpays_hub::llm::{Embedder, Generator};
use poolpays_hub::search::{RetrievalPolicy, SearchEngine};
use poolpays_hub::store::VectorStore;

/// Orchestrator over a freshly bootstrapped store (the 4 core-memory seeds)
/// with a keyword embedder and a scripted generator.
async fn pipeline(
    dir: &tempfile::TempDir,
    keyword: &str,
    generator: Arc<ScriptedGenerator>,
) -> Orchestrator {
    let embedder: Arc<dyn Embedder> = KeywordEmbedder::new(keyword);
    let store = Arc::new(
        VectorStore::open(dir.path().join("store.json"), Arc::clone(&embedder))
            .await
            .unwrap(),
    );
    let search = SearchEngine::new(store, embedder, RetrievalPolicy::default());
    let supervisor = Supervisor::new(Arc::clone(&generator) as Arc<dyn Generator>);
    Orchestrator::new(supervisor, search, generator as Arc<dyn Generator>)
}

#[tokio::test]
async fn forced_guardian_sees_only_core_identity() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("The house always wins.");
    let orchestrator = pipeline(&dir, "manifesto", Arc::clone(&generator)).await;

    let reply = orchestrator
        .run(
            "What is the manifesto?",
            Some(AgentRole::Guardian),
            &[],
            None,
        )
        .await;

    assert_eq!(reply.agent, AgentRole::Guardian);
    assert_eq!(reply.text, "The house always wins.");

    // The manifesto seed matches; tech docs are out of scope entirely.
    let titles: Vec<_> = reply
        .context
        .iter()
        .map(|d| d.metadata.title.as_str())
        .collect();
    assert_eq!(titles, vec!["PoolPays Manifesto"]);
    assert!(reply.context.iter().all(|d| d.scope().as_str() != "TECH_DOCS"));

    let steps: Vec<_> = reply.logs.iter().map(|l| l.step).collect();
    assert_eq!(
        steps,
        vec![
            LogStep::ManualOverride,
            LogStep::MemoryAccess,
            LogStep::Citation,
            LogStep::ExecutionComplete,
        ]
    );
    assert_eq!(
        reply.logs[1].details,
        "Agent GUARDIAN querying Neural Folders: CORE_IDENTITY..."
    );
    assert_eq!(
        reply.logs[2].details,
        "Found 1 references: PoolPays Manifesto"
    );

    // No classification call was made; the one call is the answer prompt.
    assert_eq!(generator.call_count(), 1);
    let prompt = generator.last_prompt();
    assert!(prompt.contains("You are the GUARDIAN"));
    assert!(prompt.contains("[SOURCE: CORE_IDENTITY - PoolPays Manifesto]"));
    assert!(prompt.contains("No previous context."));
    assert!(prompt.contains("CURRENT USER COMMAND:\n\"What is the manifesto?\""));
}

#[tokio::test]
async fn auto_routing_runs_one_classification_call() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("ARCHITECT");
    let orchestrator = pipeline(&dir, "arquitetura", Arc::clone(&generator)).await;

    let reply = orchestrator
        .run("How does the liquidity engine work?", None, &[], None)
        .await;

    assert_eq!(reply.agent, AgentRole::Architect);
    assert_eq!(generator.call_count(), 2);

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].1.contains("Reply ONE word"));
    assert!(prompts[1].1.contains("You are ARCHITECT"));
    drop(prompts);

    let steps: Vec<_> = reply.logs.iter().map(|l| l.step).collect();
    assert_eq!(steps[0], LogStep::IntentAnalysis);
    assert_eq!(steps[1], LogStep::Delegation);
    assert_eq!(
        reply.logs[1].details,
        "Intent detected. Delegating to: ARCHITECT"
    );
}

#[tokio::test]
async fn empty_generation_returns_malfunction_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("");
    let orchestrator = pipeline(&dir, "manifesto", Arc::clone(&generator)).await;

    let reply = orchestrator
        .run("What is the manifesto?", Some(AgentRole::Guardian), &[], None)
        .await;

    assert_eq!(reply.text, "Agent malfunction.");
    // The run still completes with a full audit trail.
    assert_eq!(
        reply.logs.last().unwrap().step,
        LogStep::ExecutionComplete
    );
}

#[tokio::test]
async fn memory_miss_is_logged_when_nothing_is_relevant() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("Information not found in Knowledge Base");
    // Keyword matches the query but nothing in the seed set, so the query
    // embeds orthogonally to every seed and retrieval misses.
    let orchestrator = pipeline(&dir, "zzz-no-such-term", Arc::clone(&generator)).await;

    let reply = orchestrator
        .run(
            "zzz-no-such-term unrelated question",
            Some(AgentRole::Growth),
            &[],
            None,
        )
        .await;

    assert!(reply.context.is_empty());
    let miss = reply
        .logs
        .iter()
        .find(|l| l.step == LogStep::MemoryMiss)
        .unwrap();
    assert_eq!(
        miss.details,
        "No relevant documents found in folders: MARKETING_OPS, CORE_IDENTITY"
    );
}

#[tokio::test]
async fn prompt_includes_only_the_trailing_history_window() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("ok");
    let orchestrator = pipeline(&dir, "manifesto", Arc::clone(&generator)).await;

    let mut history = Vec::new();
    for i in 0..4 {
        history.push(ChatMessage::user(format!("question {i}")));
        history.push(ChatMessage::assistant(
            format!("answer {i}"),
            AgentRole::Guardian,
        ));
    }

    orchestrator
        .run("follow-up", Some(AgentRole::Guardian), &history, None)
        .await;

    // 8 messages, window of 6: the first exchange is dropped.
    let prompt = generator.last_prompt();
    assert!(!prompt.contains("question 0"));
    assert!(!prompt.contains("answer 0"));
    assert!(prompt.contains("USER: question 1"));
    assert!(prompt.contains("ASSISTANT (GUARDIAN): answer 3"));
}

#[tokio::test]
async fn progress_checkpoints_fire_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new("done");
    let orchestrator = pipeline(&dir, "manifesto", Arc::clone(&generator)).await;

    let stages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&stages);
    let sink = move |agent: AgentRole, stage: &str| {
        recorder.lock().unwrap().push(format!("{agent}: {stage}"));
    };

    orchestrator
        .run(
            "What is the manifesto?",
            Some(AgentRole::Guardian),
            &[],
            Some(&sink),
        )
        .await;

    let stages = stages.lock().unwrap();
    assert_eq!(
        *stages,
        vec![
            "SUPERVISOR: Manual override active",
            "GUARDIAN: GUARDIAN searching memory...",
            "GUARDIAN: GUARDIAN generating response...",
            "GUARDIAN: Complete",
        ]
    );
}
