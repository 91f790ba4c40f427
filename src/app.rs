use std::collections::HashSet;

use thiserror::Error;

use crate::engine::curriculum::{self, Lesson, LessonStatus};
use crate::engine::scoring::{self, XP_PER_LESSON};
use crate::generator::GeneratedContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    Lesson,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no lesson with id {0:?}")]
    UnknownLesson(String),

    #[error("lesson {0} is still locked")]
    LessonLocked(String),
}

/// Generated content together with the lesson it was generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveContent {
    pub lesson_id: String,
    pub content: GeneratedContent,
}

/// Session state: view, catalog, progress. Lives as long as the process.
pub struct AppState {
    pub current_view: AppView,
    selected_lesson: Option<String>,
    completed_lesson_ids: HashSet<String>,
    xp: u32,
    lessons: Vec<Lesson>,
    active_lesson_content: Option<ActiveContent>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_view: AppView::Dashboard,
            selected_lesson: None,
            completed_lesson_ids: HashSet::new(),
            xp: 0,
            lessons: curriculum::initialize_lessons(),
            active_lesson_content: None,
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    fn lesson_mut(&mut self, lesson_id: &str) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| l.id == lesson_id)
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn completed_count(&self) -> usize {
        self.completed_lesson_ids.len()
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.contains(lesson_id)
    }

    pub fn completion_rate(&self) -> u32 {
        scoring::completion_rate(self.completed_count())
    }

    pub fn selected_lesson(&self) -> Option<&Lesson> {
        self.selected_lesson
            .as_deref()
            .and_then(|id| self.lesson(id))
    }

    /// Mark a lesson completed, award XP and unlock the next day.
    ///
    /// Returns false without touching anything when the lesson is unknown or
    /// was already completed.
    pub fn complete_lesson(&mut self, lesson_id: &str) -> bool {
        if self.completed_lesson_ids.contains(lesson_id) {
            return false;
        }
        let Some(lesson) = self.lesson_mut(lesson_id) else {
            return false;
        };
        lesson.status = LessonStatus::Completed;
        self.completed_lesson_ids.insert(lesson_id.to_string());
        self.xp += XP_PER_LESSON;

        if let Some(next_id) = curriculum::next_lesson_id(lesson_id) {
            if let Some(next) = self.lesson_mut(&next_id) {
                if next.status == LessonStatus::Locked {
                    next.status = LessonStatus::Available;
                }
            }
        }
        true
    }

    /// Select a lesson for viewing. Locked and unknown lessons leave state untouched.
    pub fn select_lesson(&mut self, lesson_id: &str) -> Result<&Lesson, StateError> {
        let lesson = self
            .lesson(lesson_id)
            .ok_or_else(|| StateError::UnknownLesson(lesson_id.to_string()))?;
        if lesson.is_locked() {
            return Err(StateError::LessonLocked(lesson_id.to_string()));
        }
        self.selected_lesson = Some(lesson_id.to_string());
        self.lesson(lesson_id)
            .ok_or_else(|| StateError::UnknownLesson(lesson_id.to_string()))
    }

    pub fn show_dashboard(&mut self) {
        self.current_view = AppView::Dashboard;
    }

    /// Switch to the lesson view. Does nothing when no lesson is selected.
    pub fn show_lesson(&mut self) {
        if self.selected_lesson.is_some() {
            self.current_view = AppView::Lesson;
        }
    }

    pub fn cached_content(&self, lesson_id: &str) -> Option<&GeneratedContent> {
        self.active_lesson_content
            .as_ref()
            .filter(|active| active.lesson_id == lesson_id)
            .map(|active| &active.content)
    }

    /// Replace the cached content. Only one lesson's content is kept at a time.
    pub fn cache_content(&mut self, lesson_id: &str, content: GeneratedContent) {
        self.active_lesson_content = Some(ActiveContent {
            lesson_id: lesson_id.to_string(),
            content,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::curriculum::CURRICULUM_DAYS;
    use crate::generator::CodeSnippet;

    fn status(state: &AppState, id: &str) -> LessonStatus {
        state.lesson(id).unwrap().status
    }

    fn content(grammar: &str) -> GeneratedContent {
        GeneratedContent {
            grammar: grammar.to_string(),
            vocabulary: vec!["deploy".to_string()],
            reading_passage: String::new(),
            code_snippet: CodeSnippet {
                language: "html".to_string(),
                code: "<main></main>".to_string(),
                explanation: String::new(),
            },
            quiz: Vec::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.current_view, AppView::Dashboard);
        assert!(state.selected_lesson().is_none());
        assert_eq!(state.xp(), 0);
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.lessons().len(), 30);
    }

    #[test]
    fn test_complete_lesson_unlocks_next() {
        let mut state = AppState::new();
        assert!(state.complete_lesson("1"));
        assert_eq!(state.xp(), 10);
        assert_eq!(status(&state, "1"), LessonStatus::Completed);
        assert_eq!(status(&state, "2"), LessonStatus::Available);
        assert_eq!(status(&state, "3"), LessonStatus::Locked);
    }

    #[test]
    fn test_complete_lesson_is_idempotent() {
        let mut state = AppState::new();
        assert!(state.complete_lesson("1"));
        assert!(!state.complete_lesson("1"));
        assert_eq!(state.xp(), 10);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(status(&state, "1"), LessonStatus::Completed);
        assert_eq!(status(&state, "2"), LessonStatus::Available);
    }

    #[test]
    fn test_lessons_stay_locked_until_previous_completed() {
        let mut state = AppState::new();
        for day in 2..=CURRICULUM_DAYS {
            let id = day.to_string();
            let prev = (day - 1).to_string();
            assert_eq!(status(&state, &id), LessonStatus::Locked);
            state.complete_lesson(&prev);
            assert_eq!(status(&state, &id), LessonStatus::Available);
        }
    }

    #[test]
    fn test_complete_last_lesson() {
        let mut state = AppState::new();
        for day in 1..=CURRICULUM_DAYS {
            state.complete_lesson(&day.to_string());
        }
        assert_eq!(state.xp(), 300);
        assert_eq!(state.completion_rate(), 100);
        assert_eq!(state.lessons().len(), 30);
        assert!(state.lesson("31").is_none());
    }

    #[test]
    fn test_complete_does_not_downgrade_next() {
        let mut state = AppState::new();
        state.complete_lesson("1");
        state.complete_lesson("2");
        // Re-completing an earlier lesson out of order must not touch lesson 2.
        state.completed_lesson_ids.remove("1");
        state.complete_lesson("1");
        assert_eq!(status(&state, "2"), LessonStatus::Completed);
    }

    #[test]
    fn test_complete_unknown_lesson_is_noop() {
        let mut state = AppState::new();
        assert!(!state.complete_lesson("99"));
        assert!(!state.complete_lesson("abc"));
        assert_eq!(state.xp(), 0);
        assert_eq!(state.completed_count(), 0);
    }

    #[test]
    fn test_select_available_lesson() {
        let mut state = AppState::new();
        let lesson = state.select_lesson("1").unwrap();
        assert_eq!(lesson.topic, "Initial Setup");
        assert_eq!(state.selected_lesson().unwrap().id, "1");
    }

    #[test]
    fn test_select_locked_lesson_leaves_state() {
        let mut state = AppState::new();
        assert_eq!(
            state.select_lesson("2").unwrap_err(),
            StateError::LessonLocked("2".to_string())
        );
        assert!(state.selected_lesson().is_none());
        assert_eq!(state.current_view, AppView::Dashboard);
    }

    #[test]
    fn test_select_unknown_lesson_leaves_state() {
        let mut state = AppState::new();
        state.select_lesson("1").unwrap();
        assert!(matches!(
            state.select_lesson("42"),
            Err(StateError::UnknownLesson(_))
        ));
        assert_eq!(state.selected_lesson().unwrap().id, "1");
    }

    #[test]
    fn test_show_lesson_requires_selection() {
        let mut state = AppState::new();
        state.show_lesson();
        assert_eq!(state.current_view, AppView::Dashboard);
        state.select_lesson("1").unwrap();
        state.show_lesson();
        assert_eq!(state.current_view, AppView::Lesson);
        state.show_dashboard();
        assert_eq!(state.current_view, AppView::Dashboard);
    }

    #[test]
    fn test_content_cache_is_keyed_by_lesson() {
        let mut state = AppState::new();
        state.cache_content("1", content("to be"));
        assert_eq!(state.cached_content("1").unwrap().grammar, "to be");
        assert!(state.cached_content("2").is_none());

        state.cache_content("2", content("present continuous"));
        assert!(state.cached_content("1").is_none());
        assert_eq!(
            state.cached_content("2").unwrap().grammar,
            "present continuous"
        );
    }
}
