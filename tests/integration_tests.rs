//! Integration tests for LabelCheck.
//!
//! These tests drive the public API end to end without touching the network.

use std::sync::Arc;
use std::time::Duration;

use labelcheck::{
    AnalysisState, AnalyzeLabelUseCase, ApiKey, Commands, Container, ContainerConfig, InputArgs,
    MockTransport, OpenAiCompletionClient, OutputFormat, ProfileArgs, PromptBuilder, Router,
    StaticCredentialProvider, TransportError, UserProfile,
};

const LABEL: &str = "Nutrition Facts\nTrans Fat 0g\nINGREDIENTS: ENRICHED FLOUR, SUGAR, RED 40";

fn use_case_with(transport: Arc<MockTransport>) -> AnalyzeLabelUseCase {
    let client = OpenAiCompletionClient::with_defaults(transport);
    AnalyzeLabelUseCase::new(Arc::new(client), ApiKey::new("sk-test"))
}

fn container_with(transport: Arc<MockTransport>) -> Container {
    Container::with_adapters(
        ContainerConfig {
            show_progress: false,
            ..ContainerConfig::default()
        },
        transport,
        Arc::new(StaticCredentialProvider::new("sk-test")),
    )
}

fn analyze(text: &str, format: OutputFormat) -> Commands {
    Commands::Analyze {
        input: InputArgs {
            text: Some(text.to_string()),
            file: None,
        },
        profile: ProfileArgs::default(),
        format,
    }
}

#[tokio::test]
async fn test_guest_prompt_never_carries_profile_values() {
    let profile = UserProfile::reconstitute(
        true,
        58,
        "female".to_string(),
        "tree nuts".to_string(),
        "celiac disease".to_string(),
    );
    let prompt = PromptBuilder::new().build_prompt(LABEL, &profile);

    assert!(prompt.as_str().ends_with(LABEL));
    for value in ["58", "female", "tree nuts", "celiac disease"] {
        assert!(!prompt.as_str().contains(value));
    }
}

#[tokio::test]
async fn test_member_prompt_sent_over_the_wire() {
    let transport = Arc::new(MockTransport::with_completion("Red 40: artificial dye."));
    let use_case = use_case_with(Arc::clone(&transport));
    let profile = UserProfile::member(12, "male", "none", "ADHD");

    let mut handle = use_case.mount(LABEL, &profile);
    let state = handle.settled().await;

    assert_eq!(state, Some(AnalysisState::Succeeded("Red 40: artificial dye.".to_string())));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    let sent = body["messages"][1]["content"].as_str().unwrap();
    assert!(sent.starts_with(
        "Consider the individual's age (12 years), gender (male), allergies (none), and health concerns (ADHD). "
    ));
    assert!(sent.ends_with(LABEL));
}

#[tokio::test]
async fn test_one_request_per_mount_regardless_of_reads() {
    let transport = Arc::new(MockTransport::new().with_delay(Duration::from_millis(30)));
    let use_case = use_case_with(Arc::clone(&transport));

    let mut handle = use_case.mount(LABEL, &UserProfile::guest());
    while handle.is_pending() {
        let _ = handle.state();
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    handle.settled().await;

    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_each_mount_issues_its_own_request() {
    let transport = Arc::new(MockTransport::new());
    let use_case = use_case_with(Arc::clone(&transport));

    let mut first = use_case.mount(LABEL, &UserProfile::guest());
    let mut second = use_case.mount(LABEL, &UserProfile::guest());
    first.settled().await;
    second.settled().await;

    assert_ne!(first.id(), second.id());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_http_failure_reaches_presentation_state() {
    let transport = Arc::new(MockTransport::with_response(500, "upstream down"));
    let mut handle = use_case_with(transport).mount(LABEL, &UserProfile::guest());

    assert_eq!(
        handle.settled().await,
        Some(AnalysisState::Failed("HTTP error! Status: 500".to_string()))
    );
}

#[tokio::test]
async fn test_transport_failures_reach_presentation_state() {
    let transport = Arc::new(MockTransport::failing(TransportError::new("boom")));
    let mut handle = use_case_with(transport).mount(LABEL, &UserProfile::guest());
    assert_eq!(handle.settled().await, Some(AnalysisState::Failed("boom".to_string())));

    let transport = Arc::new(MockTransport::failing(TransportError::unknown()));
    let mut handle = use_case_with(transport).mount(LABEL, &UserProfile::guest());
    assert_eq!(
        handle.settled().await,
        Some(AnalysisState::Failed("An unknown error occurred.".to_string()))
    );
}

#[tokio::test]
async fn test_router_prints_reply_text() {
    let transport = Arc::new(MockTransport::with_completion("Sugar: excess calories."));
    let container = container_with(transport);

    let output = Router::new(&container)
        .route(analyze(LABEL, OutputFormat::Text))
        .await
        .unwrap();

    assert_eq!(output, "Sugar: excess calories.");
}

#[tokio::test]
async fn test_router_text_failure_is_an_error() {
    let transport = Arc::new(MockTransport::with_response(429, "slow down"));
    let container = container_with(transport);

    let err = Router::new(&container)
        .route(analyze(LABEL, OutputFormat::Text))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! Status: 429");
}

#[tokio::test]
async fn test_router_json_reports_failed_state() {
    let transport = Arc::new(MockTransport::with_response(503, "busy"));
    let container = container_with(transport);

    let output = Router::new(&container)
        .route(analyze(LABEL, OutputFormat::Json))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["status"], "failed");
    assert_eq!(json["text"], "HTTP error! Status: 503");
}

#[tokio::test]
async fn test_prompt_command_does_not_call_the_api() {
    let transport = Arc::new(MockTransport::new());
    let container = container_with(Arc::clone(&transport));

    let output = Router::new(&container)
        .route(Commands::Prompt {
            input: InputArgs {
                text: Some(LABEL.to_string()),
                file: None,
            },
            profile: ProfileArgs::default(),
        })
        .await
        .unwrap();

    assert!(output.ends_with(LABEL));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_blank_label_text_is_rejected() {
    let transport = Arc::new(MockTransport::new());
    let container = container_with(Arc::clone(&transport));

    let result = Router::new(&container)
        .route(analyze("   ", OutputFormat::Text))
        .await;

    assert!(result.is_err());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_prompt_command_reads_fixture_files() {
    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let container = container_with(Arc::new(MockTransport::new()));

    let output = Router::new(&container)
        .route(Commands::Prompt {
            input: InputArgs {
                text: None,
                file: Some(fixtures.join("label.txt")),
            },
            profile: ProfileArgs {
                profile: Some(fixtures.join("profile.json")),
                ..ProfileArgs::default()
            },
        })
        .await
        .unwrap();

    let label = std::fs::read_to_string(fixtures.join("label.txt")).unwrap();
    assert!(output.starts_with(
        "Consider the individual's age (63 years), gender (male), allergies (soy), and health concerns (heart disease). "
    ));
    assert!(output.ends_with(&label));
}
