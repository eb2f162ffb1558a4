//! Bounded multi-turn execution loop

use std::sync::Arc;

use serde_json::{json, Value};

use roster_protocol::{ContentBlock, Message, Role, StopReason};
use roster_providers::ModelClient;
use roster_store::{ActivityKind, ActivityRecord, AgentConfig, DataStore};
use roster_tools::{ToolContext, ToolRegistry};

use crate::RuntimeError;

/// Hard ceiling on model rounds within one invocation.
pub const MAX_ROUNDS: usize = 10;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub max_rounds: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// What one completed invocation produced.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub response: String,
    pub tools_used: Vec<String>,
    pub activity_id: String,
    pub rounds: usize,
}

/// Drives one agent invocation: model call, tool dispatch, repeat until
/// the model stops asking for tools or the round cap is hit. Tool
/// failures are fed back to the model as error payloads; only transport
/// and store failures abort the invocation.
pub struct ExecutionLoop {
    client: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    store: Arc<dyn DataStore>,
    config: LoopConfig,
}

impl ExecutionLoop {
    pub fn new(
        client: Arc<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            client,
            tools,
            store,
            config: LoopConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one invocation to completion. Exactly one Reply activity
    /// record is written on success; a transport failure writes none.
    pub async fn run(
        &self,
        agent: &AgentConfig,
        instructions: &str,
        message: &str,
        tenant_id: &str,
        history: &[Message],
        metadata: Value,
    ) -> Result<LoopOutcome, RuntimeError> {
        let specs = self.tools.declarations(&agent.tools);
        let ctx = ToolContext::new(&agent.name, tenant_id);

        let mut transcript: Vec<Message> = Vec::with_capacity(history.len() + 2);
        transcript.push(Message::system(instructions));
        transcript.extend(history.iter().cloned());
        transcript.push(Message::user(message));

        let mut best_effort = String::new();
        let mut tools_used: Vec<String> = Vec::new();
        let mut rounds = 0;

        loop {
            rounds += 1;
            let response = self.client.chat(&transcript, &specs).await?;

            let text = response.text();
            if !text.trim().is_empty() {
                best_effort = text;
            }

            transcript.push(Message::with_blocks(Role::Assistant, response.content.clone()));

            let calls = response.tool_calls();
            if calls.is_empty() {
                break;
            }

            // Requested names are audited whether or not the call runs.
            for call in &calls {
                tools_used.push(call.name.clone());
            }

            if matches!(response.stop_reason, Some(StopReason::EndTurn))
                && !best_effort.is_empty()
            {
                break;
            }

            if rounds >= self.config.max_rounds {
                tracing::warn!(
                    agent = %agent.name,
                    rounds,
                    "round cap reached, returning best-effort answer"
                );
                break;
            }

            let mut results = Vec::with_capacity(calls.len());
            for call in calls {
                let execution = self.tools.execute(&call.name, call.input, &ctx).await;
                let block = if execution.is_error {
                    ContentBlock::tool_error(call.id, execution.content)
                } else {
                    ContentBlock::tool_result(call.id, execution.content)
                };
                results.push(block);
            }
            transcript.push(Message::tool_results(results));
        }

        let mut record_meta = json!({
            "response_chars": best_effort.len(),
            "tools_used": tools_used,
            "rounds": rounds,
        });
        if let (Some(target), Some(extra)) = (record_meta.as_object_mut(), metadata.as_object()) {
            for (key, value) in extra {
                target.insert(key.clone(), value.clone());
            }
        }

        let record = ActivityRecord::new(
            &agent.name,
            tenant_id,
            ActivityKind::Reply,
            format!("Answered a message in {rounds} round(s)"),
        )
        .with_metadata(record_meta);
        let activity_id = self.store.append_activity(record).await?;

        tracing::info!(
            agent = %agent.name,
            tenant = tenant_id,
            rounds,
            tools = tools_used.len(),
            "invocation complete"
        );

        Ok(LoopOutcome {
            response: best_effort,
            tools_used,
            activity_id,
            rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use roster_protocol::{ModelResponse, TokenUsage, ToolSpec};
    use roster_providers::{ModelResult, ProviderError};
    use roster_store::InMemoryStore;

    fn text_response(text: &str) -> ModelResponse {
        ModelResponse {
            id: "msg".to_string(),
            model: "fake".to_string(),
            content: vec![ContentBlock::text(text)],
            stop_reason: Some(StopReason::EndTurn),
            usage: TokenUsage::default(),
        }
    }

    fn tool_response(text: &str, tool: &str) -> ModelResponse {
        ModelResponse {
            id: "msg".to_string(),
            model: "fake".to_string(),
            content: vec![
                ContentBlock::text(text),
                ContentBlock::tool_use("tc", tool, json!({})),
            ],
            stop_reason: Some(StopReason::ToolUse),
            usage: TokenUsage::default(),
        }
    }

    /// Pops scripted responses; answers with plain text once exhausted.
    struct Scripted {
        responses: Mutex<VecDeque<ModelResponse>>,
    }

    impl Scripted {
        fn new(responses: Vec<ModelResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for Scripted {
        async fn chat(
            &self,
            _messages: &[Message],
            _tools: &[ToolSpec],
        ) -> ModelResult<ModelResponse> {
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| text_response("done")))
        }

        fn model(&self) -> &str {
            "fake"
        }

        fn provider(&self) -> &str {
            "test"
        }
    }

    /// Requests the same tool on every round, forever.
    struct AlwaysToolUse;

    #[async_trait]
    impl ModelClient for AlwaysToolUse {
        async fn chat(
            &self,
            _messages: &[Message],
            _tools: &[ToolSpec],
        ) -> ModelResult<ModelResponse> {
            Ok(tool_response("still working", "search_activity"))
        }

        fn model(&self) -> &str {
            "fake"
        }

        fn provider(&self) -> &str {
            "test"
        }
    }

    struct Unreachable;

    #[async_trait]
    impl ModelClient for Unreachable {
        async fn chat(
            &self,
            _messages: &[Message],
            _tools: &[ToolSpec],
        ) -> ModelResult<ModelResponse> {
            Err(ProviderError::InvalidResponse("connection reset".to_string()))
        }

        fn model(&self) -> &str {
            "fake"
        }

        fn provider(&self) -> &str {
            "test"
        }
    }

    fn agent() -> AgentConfig {
        AgentConfig {
            name: "sales".to_string(),
            display_name: "Sales".to_string(),
            role: "pipeline".to_string(),
            instructions: "You manage the pipeline.".to_string(),
            tools: vec!["search_activity".to_string()],
            model: "fake".to_string(),
            temperature: 0.4,
            active: true,
        }
    }

    fn engine(client: impl ModelClient + 'static, store: Arc<InMemoryStore>) -> ExecutionLoop {
        let mut registry = ToolRegistry::new();
        roster_tools::builtins::register_builtins(&mut registry, store.clone());
        ExecutionLoop::new(Arc::new(client), Arc::new(registry), store)
    }

    #[tokio::test]
    async fn no_tool_requests_finishes_in_one_round() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(Scripted::new(vec![text_response("All set.")]), store.clone());

        let outcome = engine
            .run(&agent(), "sys", "hello", "t1", &[], Value::Null)
            .await
            .unwrap();

        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.response, "All set.");
        assert!(outcome.tools_used.is_empty());

        let activities = store.activities("t1").await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].kind, ActivityKind::Reply);
    }

    #[tokio::test]
    async fn endless_tool_requests_stop_at_the_round_cap() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(AlwaysToolUse, store.clone());

        let outcome = engine
            .run(&agent(), "sys", "audit everything", "t1", &[], Value::Null)
            .await
            .unwrap();

        assert_eq!(outcome.rounds, MAX_ROUNDS);
        assert_eq!(outcome.response, "still working");
        assert_eq!(outcome.tools_used.len(), MAX_ROUNDS);

        let activities = store.activities("t1").await.unwrap();
        assert_eq!(activities.len(), 1);
    }

    #[tokio::test]
    async fn tool_failure_feeds_back_and_the_loop_continues() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(
            Scripted::new(vec![
                tool_response("checking", "send_email"),
                text_response("I cannot send email, but here is a draft."),
            ]),
            store.clone(),
        );

        let outcome = engine
            .run(&agent(), "sys", "email the client", "t1", &[], Value::Null)
            .await
            .unwrap();

        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.tools_used, vec!["send_email".to_string()]);
        assert!(outcome.response.contains("draft"));
    }

    #[tokio::test]
    async fn duplicate_tool_names_are_kept_in_the_audit() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(
            Scripted::new(vec![
                tool_response("first pass", "search_activity"),
                tool_response("second pass", "search_activity"),
                text_response("Summary ready."),
            ]),
            store.clone(),
        );

        let outcome = engine
            .run(&agent(), "sys", "what have we done", "t1", &[], Value::Null)
            .await
            .unwrap();

        assert_eq!(
            outcome.tools_used,
            vec!["search_activity".to_string(), "search_activity".to_string()]
        );
    }

    #[tokio::test]
    async fn transport_failure_is_fatal_with_no_activity_record() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(Unreachable, store.clone());

        let result = engine
            .run(&agent(), "sys", "hello", "t1", &[], Value::Null)
            .await;

        assert!(matches!(result, Err(RuntimeError::Provider(_))));
        assert!(store.activities("t1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn caller_metadata_is_merged_into_the_record() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine(Scripted::new(vec![text_response("Done.")]), store.clone());

        engine
            .run(
                &agent(),
                "sys",
                "hello",
                "t1",
                &[],
                json!({"conversation": "c42"}),
            )
            .await
            .unwrap();

        let activities = store.activities("t1").await.unwrap();
        assert_eq!(activities[0].metadata["conversation"], "c42");
        assert_eq!(activities[0].metadata["rounds"], 1);
    }
}
