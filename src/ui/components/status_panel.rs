use crate::engine::curriculum::Lesson;
use crate::event::Action;
use crate::ui::theme::Theme;
use crate::ui::{Component, action_attrs, escape_html};

/// Placeholder shown while lesson content is being generated.
pub struct LoadingPanel<'a> {
    pub lesson: &'a Lesson,
}

impl Component for LoadingPanel<'_> {
    fn render(&self) -> String {
        format!(
            r#"<div class="loading" data-pending data-lesson="{id}">
  <button class="back-link"{back}>&larr; Back to Dashboard</button>
  <div class="spinner"></div>
  <p class="loading-text">Generating your technical English lesson...</p>
  <p class="loading-detail">Day {day}: {topic}</p>
</div>"#,
            id = escape_html(&self.lesson.id),
            back = action_attrs(&Action::GoDashboard),
            day = self.lesson.day,
            topic = escape_html(&self.lesson.topic),
        )
    }
}

/// Inline failure with a retry affordance. Navigation stays available.
pub struct ErrorPanel<'a> {
    pub lesson: &'a Lesson,
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl Component for ErrorPanel<'_> {
    fn render(&self) -> String {
        format!(
            r#"<div class="lesson-error" data-lesson="{id}">
  <button class="back-link"{back}>&larr; Back to Dashboard</button>
  <div class="{class}" role="alert">
    <h3>Failed to load lesson</h3>
    <p>{message}</p>
    <button class="btn-primary"{retry}>Try again</button>
  </div>
</div>"#,
            id = escape_html(&self.lesson.id),
            back = action_attrs(&Action::GoDashboard),
            class = escape_html(&self.theme.error),
            message = escape_html(self.message),
            retry = action_attrs(&Action::Retry),
        )
    }
}
