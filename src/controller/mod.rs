//! Turns user actions and generation outcomes into state changes and markup.
//!
//! The controller never awaits anything itself. Handlers return the
//! generation calls they want made; the runtime performs them and feeds the
//! outcome back through [`Controller::handle`]. Every outcome carries the
//! token it was issued with, and only the most recent token per request kind
//! is honoured.

pub mod dispatch;
pub mod handlers;

use tracing::{debug, info, warn};

use crate::app::{AppState, AppView};
use crate::event::{Action, ActionKind, AppEvent, GenerationOutcome};
use crate::generator::GeneratedContent;
use crate::host::Host;
use crate::session::lesson::{ContentState, LessonSession, SummaryState};
use crate::session::request::{GenerationRequest, RequestKind, RequestTracker};
use crate::ui::Component;
use crate::ui::components::dashboard::Dashboard;
use crate::ui::components::lesson_panel::LessonPanel;
use crate::ui::components::navbar::Navbar;
use crate::ui::components::status_panel::{ErrorPanel, LoadingPanel};
use crate::ui::layout::AppLayout;
use crate::ui::theme::Theme;

use dispatch::{DispatchTable, Handler};

/// Shown when the generator answers a summary prompt with nothing.
pub const FALLBACK_SUMMARY: &str = "Keep practicing!";

pub struct Controller<H: Host> {
    state: AppState,
    theme: Theme,
    session: Option<LessonSession>,
    requests: RequestTracker,
    dispatch: DispatchTable<H>,
    host: H,
}

impl<H: Host> Controller<H> {
    pub fn new(host: H, theme: Theme) -> Self {
        Self {
            state: AppState::new(),
            theme,
            session: None,
            requests: RequestTracker::new(),
            dispatch: DispatchTable::new(),
            host,
        }
    }

    /// Register handlers, draw the dashboard and drop the loading indicator.
    pub fn mount(&mut self) {
        for &kind in ActionKind::all() {
            self.dispatch.register(kind, handler_for(kind));
        }
        self.render();
        self.host.hide_loading();
        info!(handlers = self.dispatch.len(), "controller mounted");
    }

    /// Detach all handlers. Later actions are ignored.
    pub fn unmount(&mut self) {
        self.dispatch.clear();
        info!("controller unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.dispatch.is_empty()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> Option<&LessonSession> {
        self.session.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<GenerationRequest> {
        match event {
            AppEvent::Action(action) => self.dispatch(action),
            AppEvent::Generated(outcome) => {
                if self.apply_outcome(outcome) {
                    self.render();
                }
                Vec::new()
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<GenerationRequest> {
        let kind = action.kind();
        let Some(handler) = self.dispatch.get(kind) else {
            debug!(action = kind.to_key(), "no handler registered; ignoring");
            return Vec::new();
        };
        debug!(action = kind.to_key(), arg = ?action.arg(), "dispatching");
        let requests = handler(self, &action);
        self.render();
        requests
    }

    /// Returns false when the outcome was stale and nothing changed.
    fn apply_outcome(&mut self, outcome: GenerationOutcome) -> bool {
        let GenerationOutcome {
            token,
            kind,
            lesson_id,
            result,
        } = outcome;

        if !self.requests.settle(kind, token, &lesson_id) {
            debug!(%token, kind = kind.as_str(), lesson = %lesson_id, "discarding stale response");
            return false;
        }

        match kind {
            RequestKind::LessonContent => {
                let parsed = result
                    .map_err(|e| e.to_string())
                    .and_then(|raw| GeneratedContent::parse(&raw).map_err(|e| e.to_string()));
                match parsed {
                    Ok(content) => {
                        info!(%token, lesson = %lesson_id, "lesson content ready");
                        let question_count = content.quiz.len();
                        self.state.cache_content(&lesson_id, content);
                        if let Some(session) = self.session_for(&lesson_id) {
                            session.content_ready(question_count);
                        }
                    }
                    Err(message) => {
                        warn!(%token, lesson = %lesson_id, "lesson content failed: {message}");
                        if let Some(session) = self.session_for(&lesson_id) {
                            session.content = ContentState::Failed(message);
                        }
                    }
                }
            }
            RequestKind::Summary => match result {
                Ok(text) => {
                    let text = match text.trim() {
                        "" => FALLBACK_SUMMARY.to_string(),
                        trimmed => trimmed.to_string(),
                    };
                    if self.state.complete_lesson(&lesson_id) {
                        info!(lesson = %lesson_id, xp = self.state.xp(), "lesson completed");
                    }
                    if let Some(session) = self.session_for(&lesson_id) {
                        session.summary = SummaryState::Ready(text);
                    }
                }
                Err(err) => {
                    warn!(%token, lesson = %lesson_id, "summary failed: {err}");
                    if let Some(session) = self.session_for(&lesson_id) {
                        session.summary = SummaryState::Failed(err.to_string());
                    }
                }
            },
        }
        true
    }

    fn session_for(&mut self, lesson_id: &str) -> Option<&mut LessonSession> {
        self.session.as_mut().filter(|s| s.lesson_id == lesson_id)
    }

    fn render(&mut self) {
        let navbar = Navbar::new(self.state.xp());
        let dashboard = Dashboard::new(
            self.state.lessons(),
            self.state.completed_count(),
            &self.theme,
        );

        let main: Box<dyn Component + '_> = match self.state.current_view {
            AppView::Dashboard => Box::new(dashboard),
            AppView::Lesson => match (self.state.selected_lesson(), self.session.as_ref()) {
                (Some(lesson), Some(session)) if session.lesson_id == lesson.id => {
                    match &session.content {
                        ContentState::Loading => Box::new(LoadingPanel { lesson }),
                        ContentState::Failed(message) => Box::new(ErrorPanel {
                            lesson,
                            message,
                            theme: &self.theme,
                        }),
                        ContentState::Ready => match self.state.cached_content(&lesson.id) {
                            Some(content) => Box::new(LessonPanel::new(
                                lesson,
                                content,
                                &session.quiz,
                                &session.summary,
                                &self.theme,
                            )),
                            None => Box::new(ErrorPanel {
                                lesson,
                                message: "Lesson content is no longer available.",
                                theme: &self.theme,
                            }),
                        },
                    }
                }
                _ => Box::new(dashboard),
            },
        };

        let markup = AppLayout::new(&navbar, main.as_ref()).render();
        self.host.mount(markup);
    }
}

fn handler_for<H: Host>(kind: ActionKind) -> Handler<H> {
    match kind {
        ActionKind::SelectLesson => handlers::select_lesson,
        ActionKind::GoDashboard => handlers::go_dashboard,
        ActionKind::FinishLesson => handlers::finish_lesson,
        ActionKind::StartChat => handlers::start_chat,
        ActionKind::Retry => handlers::retry,
        ActionKind::AnswerQuiz => handlers::answer_quiz,
    }
}
