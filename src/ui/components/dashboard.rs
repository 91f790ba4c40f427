use std::fmt::Write;

use crate::engine::curriculum::{CURRICULUM_DAYS, Lesson, LessonStatus};
use crate::engine::scoring;
use crate::event::Action;
use crate::ui::theme::Theme;
use crate::ui::{Component, action_attrs, escape_html};

/// Progress overview and the 30-day lesson grid.
pub struct Dashboard<'a> {
    pub lessons: &'a [Lesson],
    pub completed_count: usize,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(lessons: &'a [Lesson], completed_count: usize, theme: &'a Theme) -> Self {
        Self {
            lessons,
            completed_count,
            theme,
        }
    }

    fn render_card(&self, lesson: &Lesson, out: &mut String) {
        let interaction = if lesson.is_locked() {
            String::new()
        } else {
            action_attrs(&Action::SelectLesson(lesson.id.clone()))
        };
        let marker = match lesson.status {
            LessonStatus::Locked => r#"<span class="marker marker-locked" title="Locked">&#128274;</span>"#,
            LessonStatus::Completed => r#"<span class="marker marker-completed" title="Completed">&#10003;</span>"#,
            LessonStatus::Available => "",
        };
        let badge = if lesson.status == LessonStatus::Available {
            r#"<div class="card-footer"><span class="start-badge">Start Now</span></div>"#
        } else {
            ""
        };

        let _ = write!(
            out,
            r#"
      <div class="{class}" data-lesson="{id}" data-status="{status}"{interaction}>
        <div class="card-header">
          <span class="day-badge">DAY {day}</span>
          <span class="level-badge">{level}</span>
          {marker}
        </div>
        <h4 class="card-title">{title}</h4>
        <p class="card-description">{description}</p>
        {badge}
      </div>"#,
            class = escape_html(self.theme.tier_class(lesson.status)),
            id = escape_html(&lesson.id),
            status = lesson.status.to_key(),
            day = lesson.day,
            level = lesson.level.as_str(),
            title = escape_html(&lesson.title),
            description = escape_html(&lesson.description),
        );
    }
}

impl Component for Dashboard<'_> {
    fn render(&self) -> String {
        let completion_rate = scoring::completion_rate(self.completed_count);

        let mut cards = String::new();
        for lesson in self.lessons {
            self.render_card(lesson, &mut cards);
        }

        format!(
            r#"<div class="dashboard">
  <div class="stats-grid">
    <div class="stat-card">
      <p class="stat-label">Monthly Progress</p>
      <h3 class="stat-value" data-completion-rate="{rate}">{rate}%</h3>
      <div class="progress-track"><div class="progress-fill" style="width: {rate}%"></div></div>
    </div>
    <div class="stat-card">
      <p class="stat-label">Lessons Completed</p>
      <h3 class="stat-value">{completed} / {total}</h3>
    </div>
    <div class="stat-card coaching-card"{chat}>
      <p class="stat-label">AI Coaching</p>
      <h3 class="stat-value">Start Live Practice</h3>
    </div>
  </div>
  <div>
    <h2 class="section-title">Your 30-Day B1 Accelerator</h2>
    <div class="lesson-grid">{cards}
    </div>
  </div>
</div>"#,
            rate = completion_rate,
            completed = self.completed_count,
            total = CURRICULUM_DAYS,
            chat = action_attrs(&Action::StartChat),
            cards = cards,
        )
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::app::AppState;

    fn cards(html: &str) -> Vec<(String, String, bool)> {
        let re = Regex::new(r#"<div class="[^"]*" data-lesson="(\d+)" data-status="(\w+)"([^>]*)>"#)
            .unwrap();
        re.captures_iter(html)
            .map(|c| {
                (
                    c[1].to_string(),
                    c[2].to_string(),
                    c[3].contains("data-action=\"select_lesson\""),
                )
            })
            .collect()
    }

    #[test]
    fn test_renders_thirty_cards_in_day_order() {
        let state = AppState::new();
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), 0, &theme).render();
        let cards = cards(&html);
        assert_eq!(cards.len(), 30);
        for (i, (id, _, _)) in cards.iter().enumerate() {
            assert_eq!(*id, (i + 1).to_string());
        }
    }

    #[test]
    fn test_fresh_state_only_first_card_interactive() {
        let state = AppState::new();
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), 0, &theme).render();
        let interactive: Vec<_> = cards(&html)
            .into_iter()
            .filter(|(_, _, interactive)| *interactive)
            .map(|(id, _, _)| id)
            .collect();
        assert_eq!(interactive, vec!["1".to_string()]);
    }

    #[test]
    fn test_card_tier_matches_status() {
        let mut state = AppState::new();
        state.complete_lesson("1");
        state.complete_lesson("2");
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), state.completed_count(), &theme).render();
        let cards = cards(&html);

        assert_eq!(cards[0].1, "completed");
        assert_eq!(cards[1].1, "completed");
        assert_eq!(cards[2].1, "available");
        assert!(cards[3..].iter().all(|(_, status, _)| status == "locked"));
        // Completed lessons stay re-viewable; locked ones never are.
        assert!(cards[0].2 && cards[1].2 && cards[2].2);
        assert!(cards[3..].iter().all(|(_, _, interactive)| !interactive));

        assert!(html.contains(&format!(
            "class=\"{}\" data-lesson=\"1\"",
            theme.tier_class(LessonStatus::Completed)
        )));
        assert!(html.contains(&format!(
            "class=\"{}\" data-lesson=\"3\"",
            theme.tier_class(LessonStatus::Available)
        )));
    }

    #[test]
    fn test_completion_rate_shown() {
        let state = AppState::new();
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), 29, &theme).render();
        assert!(html.contains("data-completion-rate=\"96\""));
        assert!(html.contains("29 / 30"));
    }

    #[test]
    fn test_theme_classes_are_escaped() {
        let state = AppState::new();
        let mut theme = Theme::default();
        theme.tiers.available = "card\" onclick=\"alert(1)".to_string();
        let html = Dashboard::new(state.lessons(), 0, &theme).render();
        assert!(html.contains("class=\"card&quot; onclick=&quot;alert(1)\" data-lesson=\"1\""));
        assert!(!html.contains("onclick=\"alert(1)\""));
    }

    #[test]
    fn test_coaching_card_has_chat_action() {
        let state = AppState::new();
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), 0, &theme).render();
        assert!(html.contains("data-action=\"start_chat\""));
    }

    #[test]
    fn test_lesson_text_is_escaped() {
        let state = AppState::new();
        let theme = Theme::default();
        let html = Dashboard::new(state.lessons(), 0, &theme).render();
        assert!(html.contains("Mastering &quot;To Be&quot;"));
    }
}
