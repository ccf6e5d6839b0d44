//! End-to-end tests for the conversation pipeline.

use chat_runtime::api::{ChatRequest, ChatResponse};
use chat_runtime::prompt::PreambleSource;
use chat_runtime::provider::{
    Accelerator, EchoProvider, Fidelity, GenerateError, InferenceProvider, LoadError,
    ProviderHandle,
};
use chat_runtime::session::{AddrAgentKey, ExportFormat, SessionId, SessionKeyDerivation};
use chat_runtime::types::{Profile, TurnRole};
use chat_runtime::{Error, Orchestrator, RuntimeConfig};
use async_trait::async_trait;
use std::sync::Arc;

fn test_config() -> RuntimeConfig {
    RuntimeConfig::default().with_preamble_source(PreambleSource::Fixed("Be helpful.".into()))
}

async fn echo_orchestrator(reply: &str) -> Orchestrator {
    let provider = Arc::new(EchoProvider::new().with_reply(reply));
    Orchestrator::new(provider, test_config()).await
}

#[tokio::test]
async fn test_round_trip_includes_user_then_assistant() {
    chat_runtime::init_tracing();
    let orch = echo_orchestrator("Nice to meet you.").await;
    let id = SessionId::from("client-1");

    let reply = orch.respond(&id, "hello", &Profile::new()).await.unwrap();
    assert_eq!(reply.response, "Nice to meet you.");

    let turns = orch.sessions().context(&id, 5);
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, TurnRole::User);
    assert_eq!(turns[0].content, "hello");
    assert_eq!(turns[1].role, TurnRole::Assistant);
    assert_eq!(turns[1].content, "Nice to meet you.");
}

#[tokio::test]
async fn test_history_caps_across_many_exchanges() {
    let orch = Orchestrator::new(
        Arc::new(EchoProvider::new()),
        test_config().with_history_cap(4),
    )
    .await;
    let id = SessionId::from("client-1");

    for i in 0..6 {
        orch.respond(&id, &format!("msg {}", i), &Profile::new())
            .await
            .unwrap();
    }

    // 12 turns appended, capped to the most recent 4.
    assert_eq!(orch.sessions().len(&id), 4);
    let turns = orch.sessions().context(&id, 10);
    assert_eq!(turns[2].content, "msg 5");
    assert_eq!(turns[3].content, "Okay.");
}

#[tokio::test]
async fn test_sessions_are_isolated_by_derived_key() {
    let orch = echo_orchestrator("ok").await;
    let a = AddrAgentKey.derive("10.0.0.1", "Mozilla/5.0");
    let b = AddrAgentKey.derive("10.0.0.2", "Mozilla/5.0");

    orch.respond(&a, "from a", &Profile::new()).await.unwrap();
    assert_eq!(orch.sessions().len(&a), 2);
    assert_eq!(orch.sessions().len(&b), 0);
}

#[tokio::test]
async fn test_empty_input_maps_to_error_shape_and_no_mutation() {
    let orch = echo_orchestrator("ok").await;
    let id = SessionId::from("client-1");

    let result = orch.respond(&id, "   ", &Profile::new()).await;
    assert!(matches!(result, Err(Error::EmptyInput)));
    assert_eq!(orch.sessions().len(&id), 0);

    let json = serde_json::to_value(ChatResponse::from_result(result)).unwrap();
    assert_eq!(json["error"], "No prompt provided.");
}

/// Loads fine, then fails every generation.
struct BrokenGeneration;

#[async_trait]
impl InferenceProvider for BrokenGeneration {
    async fn load(&self, id: &str, _fidelity: Fidelity) -> Result<ProviderHandle, LoadError> {
        Ok(ProviderHandle {
            id: id.to_string(),
            context_limit: 2048,
        })
    }

    async fn generate(
        &self,
        handle: &ProviderHandle,
        _prompt: &str,
        _max_new_tokens: u32,
    ) -> Result<String, GenerateError> {
        Err(GenerateError {
            handle: handle.id.clone(),
            reason: "decode failed".into(),
        })
    }

    fn accelerator(&self) -> Accelerator {
        Accelerator::Cpu
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn test_generation_failure_retains_the_user_turn() {
    let orch = Orchestrator::new(Arc::new(BrokenGeneration), test_config()).await;
    let id = SessionId::from("client-1");

    let err = orch.respond(&id, "hello", &Profile::new()).await.unwrap_err();
    assert!(matches!(err, Error::GenerationFailed { .. }));

    // Partial state is accepted by design: the user turn stays.
    let turns = orch.sessions().context(&id, 5);
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content, "hello");
    assert_eq!(turns[0].role, TurnRole::User);
}

#[tokio::test]
async fn test_request_settings_flow_into_the_profile() {
    let request: ChatRequest = serde_json::from_str(
        r#"{"prompt": "hello", "settings": {"nickname": "Ada", "tone": "calm"}}"#,
    )
    .unwrap();
    let orch = echo_orchestrator("ok").await;
    let id = SessionId::from("client-1");

    let reply = orch
        .respond(&id, &request.prompt, &request.profile())
        .await
        .unwrap();
    assert_eq!(reply.response, "ok");
}

#[tokio::test]
async fn test_export_after_a_conversation() {
    let orch = echo_orchestrator("Sure.").await;
    let id = SessionId::from("client-1");
    orch.respond(&id, "export me", &Profile::new()).await.unwrap();

    let text = orch.sessions().export(&id, ExportFormat::Text).unwrap();
    assert_eq!(text, "user: export me\nassistant: Sure.");

    let json = orch.sessions().export(&id, ExportFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}
