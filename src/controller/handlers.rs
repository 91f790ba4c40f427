use tracing::{debug, info};

use crate::app::AppView;
use crate::controller::Controller;
use crate::event::Action;
use crate::generator::Prompt;
use crate::host::Host;
use crate::session::lesson::{ContentState, LessonSession, SummaryState};
use crate::session::request::{GenerationRequest, RequestKind};

pub const CHAT_NOTICE: &str = "Live coaching chat is coming soon. Keep practicing with your daily lessons!";

pub fn select_lesson<H: Host>(ctrl: &mut Controller<H>, action: &Action) -> Vec<GenerationRequest> {
    let Action::SelectLesson(lesson_id) = action else {
        return Vec::new();
    };
    if let Err(err) = ctrl.state.select_lesson(lesson_id) {
        debug!(lesson = %lesson_id, "ignoring selection: {err}");
        return Vec::new();
    }
    ctrl.state.show_lesson();
    open_session(ctrl, lesson_id)
}

fn open_session<H: Host>(ctrl: &mut Controller<H>, lesson_id: &str) -> Vec<GenerationRequest> {
    if ctrl
        .session
        .as_ref()
        .is_some_and(|s| s.lesson_id != lesson_id)
    {
        ctrl.requests.cancel(RequestKind::Summary);
    }
    if !ctrl.requests.content_pending_for(lesson_id) {
        ctrl.requests.cancel(RequestKind::LessonContent);
    }

    if let Some(content) = ctrl.state.cached_content(lesson_id) {
        let resume = ctrl
            .session
            .as_ref()
            .is_some_and(|s| s.lesson_id == lesson_id && s.is_ready());
        if !resume {
            ctrl.session = Some(LessonSession::ready(lesson_id, content.quiz.len()));
        }
        debug!(lesson = %lesson_id, "reusing cached content");
        return Vec::new();
    }

    if ctrl.requests.content_pending_for(lesson_id) {
        ctrl.session = Some(LessonSession::loading(lesson_id));
        debug!(lesson = %lesson_id, "content request already in flight");
        return Vec::new();
    }

    request_content(ctrl, lesson_id)
}

fn request_content<H: Host>(ctrl: &mut Controller<H>, lesson_id: &str) -> Vec<GenerationRequest> {
    let Some(lesson) = ctrl.state.lesson(lesson_id) else {
        return Vec::new();
    };
    let prompt = Prompt::lesson(lesson);
    let request = ctrl
        .requests
        .issue(RequestKind::LessonContent, lesson_id, prompt);
    info!(token = %request.token, lesson = %lesson_id, "requesting lesson content");
    ctrl.session = Some(LessonSession::loading(lesson_id));
    vec![request]
}

pub fn go_dashboard<H: Host>(ctrl: &mut Controller<H>, _action: &Action) -> Vec<GenerationRequest> {
    ctrl.requests.cancel(RequestKind::Summary);
    if let Some(session) = ctrl.session.as_mut() {
        if session.summary.is_pending() {
            session.summary = SummaryState::Idle;
        }
    }
    ctrl.state.show_dashboard();
    Vec::new()
}

pub fn finish_lesson<H: Host>(ctrl: &mut Controller<H>, _action: &Action) -> Vec<GenerationRequest> {
    request_summary(ctrl)
}

fn request_summary<H: Host>(ctrl: &mut Controller<H>) -> Vec<GenerationRequest> {
    if ctrl.state.current_view != AppView::Lesson || ctrl.requests.summary_pending() {
        return Vec::new();
    }
    let Some(session) = ctrl.session.as_mut() else {
        return Vec::new();
    };
    if !session.is_ready() || session.summary.is_pending() {
        return Vec::new();
    }
    let Some(content) = ctrl.state.cached_content(&session.lesson_id) else {
        return Vec::new();
    };

    let prompt = Prompt::summary(content, session.quiz.result());
    let request = ctrl
        .requests
        .issue(RequestKind::Summary, &session.lesson_id, prompt);
    session.summary = SummaryState::Pending;
    info!(token = %request.token, lesson = %session.lesson_id, "requesting performance summary");
    vec![request]
}

pub fn start_chat<H: Host>(ctrl: &mut Controller<H>, _action: &Action) -> Vec<GenerationRequest> {
    ctrl.host.notify(CHAT_NOTICE);
    Vec::new()
}

pub fn retry<H: Host>(ctrl: &mut Controller<H>, _action: &Action) -> Vec<GenerationRequest> {
    if ctrl.state.current_view != AppView::Lesson {
        return Vec::new();
    }
    let Some(session) = ctrl.session.as_ref() else {
        return Vec::new();
    };
    let lesson_id = session.lesson_id.clone();
    let content_failed = matches!(session.content, ContentState::Failed(_));
    let summary_failed = session.is_ready() && matches!(session.summary, SummaryState::Failed(_));
    if content_failed {
        request_content(ctrl, &lesson_id)
    } else if summary_failed {
        request_summary(ctrl)
    } else {
        Vec::new()
    }
}

pub fn answer_quiz<H: Host>(ctrl: &mut Controller<H>, action: &Action) -> Vec<GenerationRequest> {
    let Action::AnswerQuiz { question, option } = *action else {
        return Vec::new();
    };
    let Some(session) = ctrl.session.as_mut() else {
        return Vec::new();
    };
    if !session.is_ready() || session.summary.is_pending() {
        return Vec::new();
    }
    let Some(content) = ctrl.state.cached_content(&session.lesson_id) else {
        return Vec::new();
    };
    if let Some(correct) = session.quiz.answer(&content.quiz, question, option) {
        debug!(question, option, correct, "quiz answer recorded");
    }
    Vec::new()
}
