use crate::session::quiz::QuizProgress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentState {
    /// A content request is in flight.
    Loading,
    /// Content is cached in `AppState`.
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SummaryState {
    #[default]
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

impl SummaryState {
    pub fn text(&self) -> Option<&str> {
        match self {
            SummaryState::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SummaryState::Pending)
    }
}

/// UI state for the lesson currently open in the lesson view.
#[derive(Clone, Debug)]
pub struct LessonSession {
    pub lesson_id: String,
    pub content: ContentState,
    pub quiz: QuizProgress,
    pub summary: SummaryState,
}

impl LessonSession {
    pub fn loading(lesson_id: &str) -> Self {
        Self {
            lesson_id: lesson_id.to_string(),
            content: ContentState::Loading,
            quiz: QuizProgress::default(),
            summary: SummaryState::Idle,
        }
    }

    pub fn ready(lesson_id: &str, question_count: usize) -> Self {
        let mut session = Self::loading(lesson_id);
        session.content_ready(question_count);
        session
    }

    pub fn content_ready(&mut self, question_count: usize) {
        self.content = ContentState::Ready;
        self.quiz = QuizProgress::new(question_count);
        self.summary = SummaryState::Idle;
    }

    pub fn is_ready(&self) -> bool {
        self.content == ContentState::Ready
    }
}
