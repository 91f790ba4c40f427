use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use devenglish::app::AppView;
use devenglish::controller::Controller;
use devenglish::event::Action;
use devenglish::generator::offline::OfflineService;
use devenglish::generator::{ContentService, GenerationError, Prompt};
use devenglish::host::MemoryHost;
use devenglish::runtime::Runtime;
use devenglish::session::lesson::{ContentState, SummaryState};
use devenglish::ui::theme::Theme;
use tokio::sync::oneshot;

/// Replies from a queue and records every prompt it was given.
/// A `None` reply never resolves.
struct ScriptedService {
    replies: Mutex<VecDeque<Option<Result<String, GenerationError>>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedService {
    fn new(replies: Vec<Option<Result<String, GenerationError>>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentService for ScriptedService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        let reply = self.replies.lock().unwrap().pop_front().flatten();
        match reply {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}

fn lesson_json() -> String {
    serde_json::to_string(&OfflineService::sample_lesson()).unwrap()
}

fn runtime(service: Arc<ScriptedService>, timeout: Duration) -> Runtime<MemoryHost> {
    let controller = Controller::new(MemoryHost::new(), Theme::default());
    let mut runtime = Runtime::new(controller, service, timeout);
    runtime.mount();
    runtime
}

async fn steps(runtime: &mut Runtime<MemoryHost>, n: usize) {
    for _ in 0..n {
        runtime.step().await;
    }
}

#[tokio::test]
async fn test_first_lesson_end_to_end() {
    let service = ScriptedService::new(vec![
        Some(Ok(lesson_json())),
        Some(Ok("Clear sentences about your environment.".to_string())),
    ]);
    let mut runtime = runtime(service.clone(), Duration::from_secs(5));
    let handle = runtime.handle();

    handle.send(Action::SelectLesson("1".to_string())).unwrap();
    steps(&mut runtime, 2).await;
    let session = runtime.controller().session().unwrap();
    assert!(session.is_ready());
    assert!(runtime.controller().host().markup.contains("Finish &amp; Evaluate"));

    handle.send(Action::FinishLesson).unwrap();
    steps(&mut runtime, 2).await;

    let state = runtime.controller().state();
    assert_eq!(state.xp(), 10);
    assert!(state.is_completed("1"));
    assert_eq!(state.completion_rate(), 3);
    assert_eq!(
        runtime.controller().session().unwrap().summary.text(),
        Some("Clear sentences about your environment.")
    );

    let prompts = service.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].text.contains("Day 1"));
    assert!(prompts[0].text.contains("Initial Setup"));

    handle.send(Action::GoDashboard).unwrap();
    steps(&mut runtime, 1).await;
    let markup = &runtime.controller().host().markup;
    assert!(markup.contains("data-lesson=\"2\" data-status=\"available\""));
    assert!(markup.contains("10 XP"));
}

#[tokio::test]
async fn test_leaving_while_content_loads_keeps_it_for_later() {
    let service = ScriptedService::new(vec![Some(Ok(lesson_json()))]);
    let mut runtime = runtime(service.clone(), Duration::from_secs(5));
    let handle = runtime.handle();

    handle.send(Action::SelectLesson("1".to_string())).unwrap();
    handle.send(Action::GoDashboard).unwrap();
    steps(&mut runtime, 3).await;
    assert_eq!(runtime.controller().state().current_view, AppView::Dashboard);
    assert!(runtime.controller().state().cached_content("1").is_some());

    handle.send(Action::SelectLesson("1".to_string())).unwrap();
    steps(&mut runtime, 1).await;
    assert!(runtime.controller().session().unwrap().is_ready());
    assert_eq!(service.prompts().len(), 1);
}

#[tokio::test]
async fn test_slow_generation_times_out_and_retries() {
    let service = ScriptedService::new(vec![None, Some(Ok(lesson_json()))]);
    let mut runtime = runtime(service.clone(), Duration::from_millis(50));
    let handle = runtime.handle();

    handle.send(Action::SelectLesson("1".to_string())).unwrap();
    steps(&mut runtime, 2).await;
    match &runtime.controller().session().unwrap().content {
        ContentState::Failed(message) => assert!(message.contains("timed out")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(runtime.controller().host().markup.contains("data-action=\"retry\""));

    handle.send(Action::Retry).unwrap();
    steps(&mut runtime, 2).await;
    assert!(runtime.controller().session().unwrap().is_ready());
    assert_eq!(service.prompts().len(), 2);
}

#[tokio::test]
async fn test_summary_failure_leaves_lesson_open() {
    let service = ScriptedService::new(vec![
        Some(Ok(lesson_json())),
        Some(Err(GenerationError::Upstream {
            status: 503,
            message: "overloaded".to_string(),
        })),
    ]);
    let mut runtime = runtime(service, Duration::from_secs(5));
    let handle = runtime.handle();

    handle.send(Action::SelectLesson("1".to_string())).unwrap();
    steps(&mut runtime, 2).await;
    handle.send(Action::FinishLesson).unwrap();
    steps(&mut runtime, 2).await;

    assert_eq!(runtime.controller().state().xp(), 0);
    assert!(matches!(
        runtime.controller().session().unwrap().summary,
        SummaryState::Failed(_)
    ));
    assert!(runtime.controller().host().markup.contains("data-action=\"retry\""));
}

#[tokio::test]
async fn test_run_unmounts_on_shutdown() {
    let service = ScriptedService::new(vec![]);
    let controller = Controller::new(MemoryHost::new(), Theme::default());
    let runtime = Runtime::new(controller, service, Duration::from_secs(5));
    let handle = runtime.handle();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(runtime.run(async {
        let _ = stopped.await;
    }));

    handle.dispatch(Action::StartChat).await.unwrap();
    stop.send(()).unwrap();
    let controller = task.await.unwrap();

    assert!(!controller.is_mounted());
    assert_eq!(controller.host().notices.len(), 1);
    assert!(handle.send(Action::GoDashboard).is_err());
}
