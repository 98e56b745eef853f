use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::application::CompletionService;
use crate::domain::{AnalysisState, ApiKey, CompletionResult, Prompt, PromptBuilder, UserProfile};

/// Builds the label prompt and runs it through a [`CompletionService`].
///
/// [`mount`](Self::mount) is the screen-style entry point: it launches the
/// single request in the background and hands back an [`AnalysisHandle`]
/// whose state starts as [`AnalysisState::Pending`].
pub struct AnalyzeLabelUseCase {
    completion_service: Arc<dyn CompletionService>,
    prompt_builder: PromptBuilder,
    api_key: ApiKey,
}

impl AnalyzeLabelUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>, api_key: ApiKey) -> Self {
        Self {
            completion_service,
            prompt_builder: PromptBuilder::new(),
            api_key,
        }
    }

    pub fn prompt_for(&self, extracted_text: &str, profile: &UserProfile) -> Prompt {
        let prompt = self.prompt_builder.build_prompt(extracted_text, profile);
        debug!("Built prompt ({} bytes): {}", prompt.len(), prompt);
        debug!("Profile: {:?}", profile);
        prompt
    }

    /// Runs one analysis inline and returns its result.
    pub async fn execute(&self, extracted_text: &str, profile: &UserProfile) -> CompletionResult {
        let prompt = self.prompt_for(extracted_text, profile);
        run_completion(self.completion_service.as_ref(), &prompt, &self.api_key).await
    }

    /// Starts one analysis session on the current Tokio runtime.
    ///
    /// Exactly one request is issued per call. Reading the handle's state
    /// never triggers another one.
    pub fn mount(&self, extracted_text: &str, profile: &UserProfile) -> AnalysisHandle {
        let id = Uuid::new_v4();
        let prompt = self.prompt_for(extracted_text, profile);
        let service = Arc::clone(&self.completion_service);
        let api_key = self.api_key.clone();

        let (state_tx, state_rx) = watch::channel(AnalysisState::Pending);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let span = tracing::info_span!("analysis", session = %id);
        let task = tokio::spawn(
            async move {
                let result = tokio::select! {
                    _ = task_cancel.cancelled() => {
                        info!("Analysis cancelled before the response arrived");
                        return;
                    }
                    result = run_completion(service.as_ref(), &prompt, &api_key) => result,
                };
                // Receivers may all be gone; the session still settles quietly.
                let _ = state_tx.send(AnalysisState::from(result));
            }
            .instrument(span),
        );

        AnalysisHandle {
            id,
            state: state_rx,
            cancel,
            task,
        }
    }
}

async fn run_completion(
    service: &dyn CompletionService,
    prompt: &Prompt,
    api_key: &ApiKey,
) -> CompletionResult {
    info!("Requesting analysis from {}", service.model_name());
    let start_time = Instant::now();

    let result = service.fetch_completion(prompt.as_str(), api_key).await;

    match &result {
        CompletionResult::Success(text) => info!(
            "Analysis succeeded in {:?} ({} bytes)",
            start_time.elapsed(),
            text.len()
        ),
        CompletionResult::Failure(message) => warn!(
            "Analysis failed after {:?}: {}",
            start_time.elapsed(),
            message
        ),
    }
    result
}

/// Live view of one mounted analysis.
///
/// Dropping the handle leaves the request running to completion; call
/// [`cancel`](Self::cancel) to abandon it.
pub struct AnalysisHandle {
    id: Uuid,
    state: watch::Receiver<AnalysisState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl AnalysisHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current state snapshot.
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().is_pending()
    }

    /// Waits for the terminal state. `None` if the session was cancelled
    /// before the response arrived.
    pub async fn settled(&mut self) -> Option<AnalysisState> {
        match self.state.wait_for(AnalysisState::is_settled).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once the background task has exited, settled or cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CannedService {
        reply: CompletionResult,
        delay: Duration,
        calls: AtomicUsize,
        last_prompt: std::sync::Mutex<Option<String>>,
    }

    impl CannedService {
        fn new(reply: CompletionResult) -> Self {
            Self {
                reply,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                last_prompt: std::sync::Mutex::new(None),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl CompletionService for CannedService {
        async fn fetch_completion(&self, prompt: &str, _api_key: &ApiKey) -> CompletionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn use_case(service: Arc<CannedService>) -> AnalyzeLabelUseCase {
        AnalyzeLabelUseCase::new(service, ApiKey::new("sk-test"))
    }

    #[tokio::test]
    async fn execute_passes_built_prompt_to_service() {
        let service = Arc::new(CannedService::new(CompletionResult::Success(
            "Sugar: spikes blood glucose.".into(),
        )));
        let use_case = use_case(Arc::clone(&service));

        let result = use_case.execute("Sugar 12g", &UserProfile::guest()).await;

        assert_eq!(result, CompletionResult::Success("Sugar: spikes blood glucose.".into()));
        let sent = service.last_prompt.lock().unwrap().clone().unwrap();
        assert!(sent.ends_with("Here is the text: Sugar 12g"));
    }

    #[tokio::test]
    async fn mounted_session_starts_pending_then_settles() {
        let service = Arc::new(
            CannedService::new(CompletionResult::Success("Palm oil: saturated fat.".into()))
                .with_delay(Duration::from_millis(50)),
        );
        let mut handle = use_case(Arc::clone(&service)).mount("Palm oil", &UserProfile::guest());

        assert!(handle.is_pending());
        let settled = handle.settled().await;

        assert_eq!(settled, Some(AnalysisState::Succeeded("Palm oil: saturated fat.".into())));
        assert_eq!(handle.state(), AnalysisState::Succeeded("Palm oil: saturated fat.".into()));

        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("task should exit after settling");
    }

    #[tokio::test]
    async fn failure_is_surfaced_as_failed_state() {
        let service = Arc::new(CannedService::new(CompletionResult::Failure(
            "HTTP error! Status: 500".into(),
        )));
        let mut handle = use_case(service).mount("text", &UserProfile::guest());

        assert_eq!(
            handle.settled().await,
            Some(AnalysisState::Failed("HTTP error! Status: 500".into()))
        );
    }

    #[tokio::test]
    async fn reading_state_repeatedly_issues_one_request() {
        let service = Arc::new(
            CannedService::new(CompletionResult::Success("ok".into()))
                .with_delay(Duration::from_millis(20)),
        );
        let mut handle = use_case(Arc::clone(&service)).mount("text", &UserProfile::guest());

        for _ in 0..100 {
            let _ = handle.state();
            tokio::task::yield_now().await;
        }
        handle.settled().await;
        for _ in 0..100 {
            let _ = handle.state();
        }

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_abandons_pending_session() {
        let service = Arc::new(
            CannedService::new(CompletionResult::Success("late".into()))
                .with_delay(Duration::from_secs(30)),
        );
        let mut handle = use_case(service).mount("text", &UserProfile::guest());

        handle.cancel();

        assert!(handle.is_cancelled());
        assert_eq!(handle.settled().await, None);
        assert!(handle.state().is_pending());
    }

    #[tokio::test]
    async fn dropping_handle_does_not_cancel_request() {
        let service = Arc::new(
            CannedService::new(CompletionResult::Success("done".into()))
                .with_delay(Duration::from_millis(20)),
        );
        let handle = use_case(Arc::clone(&service)).mount("text", &UserProfile::guest());
        let cancel = handle.cancel.clone();
        drop(handle);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!cancel.is_cancelled());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }
}
