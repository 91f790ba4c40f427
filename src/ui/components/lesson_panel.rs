use std::fmt::Write;

use crate::engine::curriculum::Lesson;
use crate::engine::scoring;
use crate::event::Action;
use crate::generator::{GeneratedContent, QuizQuestion};
use crate::session::lesson::SummaryState;
use crate::session::quiz::QuizProgress;
use crate::ui::theme::Theme;
use crate::ui::{Component, action_attrs, escape_html};

/// Lesson detail: generated material, quiz, and the finish/summary area.
pub struct LessonPanel<'a> {
    pub lesson: &'a Lesson,
    pub content: &'a GeneratedContent,
    pub quiz: &'a QuizProgress,
    pub summary: &'a SummaryState,
    pub theme: &'a Theme,
}

impl<'a> LessonPanel<'a> {
    pub fn new(
        lesson: &'a Lesson,
        content: &'a GeneratedContent,
        quiz: &'a QuizProgress,
        summary: &'a SummaryState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lesson,
            content,
            quiz,
            summary,
            theme,
        }
    }

    fn render_vocabulary(&self) -> String {
        self.content
            .vocabulary
            .iter()
            .map(|word| format!("<li class=\"vocab-item\">{}</li>", escape_html(word)))
            .collect()
    }

    fn render_question(&self, index: usize, question: &QuizQuestion, out: &mut String) {
        let selected = self.quiz.selected(index);
        let _ = write!(
            out,
            r#"
      <div class="quiz-question" data-question="{index}">
        <p class="quiz-prompt">{number}. {text}</p>
        <div class="quiz-options">"#,
            number = index + 1,
            text = escape_html(&question.question),
        );

        for (i, option) in question.options.iter().enumerate() {
            let (class, interaction) = match selected {
                None => (
                    "quiz-option",
                    action_attrs(&Action::AnswerQuiz {
                        question: index,
                        option: i,
                    }),
                ),
                Some(_) if i == question.correct_answer => ("quiz-option option-correct", String::new()),
                Some(choice) if choice == i => ("quiz-option option-wrong", String::new()),
                Some(_) => ("quiz-option option-disabled", String::new()),
            };
            let _ = write!(
                out,
                r#"
          <button class="{class}"{interaction}>{option}</button>"#,
                option = escape_html(option),
            );
        }
        out.push_str("\n        </div>");

        if selected.is_some() && !question.explanation.is_empty() {
            let _ = write!(
                out,
                r#"
        <p class="quiz-explanation">{}</p>"#,
                escape_html(&question.explanation)
            );
        }
        out.push_str("\n      </div>");
    }

    fn render_quiz(&self) -> String {
        if self.content.quiz.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        let ratio = scoring::quiz_ratio(self.quiz.score(), self.quiz.total());
        let _ = write!(
            out,
            r#"<div class="quiz-score" data-score="{score}">Score: {score} / {total} ({percent:.0}%)</div>"#,
            score = self.quiz.score(),
            total = self.quiz.total(),
            percent = ratio * 100.0,
        );
        for (i, question) in self.content.quiz.iter().enumerate() {
            self.render_question(i, question, &mut out);
        }
        out
    }

    fn render_summary(&self) -> String {
        match self.summary {
            SummaryState::Ready(text) => format!(
                r#"<div class="{class}" data-summary>
        <h5 class="summary-title">Performance Summary</h5>
        <p class="summary-text">{text}</p>
      </div>"#,
                class = escape_html(&self.theme.summary),
                text = escape_html(text),
            ),
            SummaryState::Failed(message) => format!(
                r#"<div class="{class}" role="alert">
        <p>Could not evaluate this lesson: {message}</p>
        <button class="btn-secondary"{retry}>Try again</button>
      </div>"#,
                class = escape_html(&self.theme.error),
                message = escape_html(message),
                retry = action_attrs(&Action::Retry),
            ),
            SummaryState::Idle | SummaryState::Pending => String::new(),
        }
    }

    fn render_finish(&self) -> String {
        if self.summary.is_pending() {
            r#"<button class="btn-primary" disabled data-pending>Evaluating...</button>"#.to_string()
        } else {
            format!(
                r#"<button class="btn-primary"{}>Finish &amp; Evaluate</button>"#,
                action_attrs(&Action::FinishLesson)
            )
        }
    }
}

impl Component for LessonPanel<'_> {
    fn render(&self) -> String {
        let snippet = &self.content.code_snippet;
        let language = if snippet.language.is_empty() {
            String::new()
        } else {
            format!(" ({})", escape_html(&snippet.language))
        };
        let explanation = if snippet.explanation.is_empty() {
            String::new()
        } else {
            format!(
                r#"<p class="code-explanation"><strong>Context:</strong> {}</p>"#,
                escape_html(&snippet.explanation)
            )
        };

        format!(
            r#"<div class="lesson" data-lesson="{id}">
  <button class="back-link"{back}>&larr; Back to Dashboard</button>
  <header class="lesson-header">
    <div class="lesson-meta">
      <span class="day-badge">DAY {day}</span>
      <span class="lesson-topic">{topic}</span>
    </div>
    <h1 class="lesson-title">{title}</h1>
    <p class="lesson-description">{description}</p>
  </header>
  <div class="lesson-grid">
    <section class="panel">
      <h3 class="panel-title grammar">Grammar Focus</h3>
      <p class="grammar-text">{grammar}</p>
    </section>
    <section class="panel">
      <h3 class="panel-title vocabulary">Core Vocabulary</h3>
      <ul class="vocab-list">{vocabulary}</ul>
    </section>
  </div>
  <section class="panel reading">
    <h3 class="panel-title">Reading: Dev Life</h3>
    <blockquote class="reading-text">{reading}</blockquote>
  </section>
  <section class="code-container">
    <h3 class="panel-title code">Applied Practice{language}</h3>
    <pre><code>{code}</code></pre>
    {explanation}
  </section>
  <section class="panel quiz">
    <h3 class="panel-title">Quick Quiz</h3>
    {quiz}
    {summary}
    {finish}
  </section>
</div>"#,
            id = escape_html(&self.lesson.id),
            back = action_attrs(&Action::GoDashboard),
            day = self.lesson.day,
            topic = escape_html(&self.lesson.topic),
            title = escape_html(&self.lesson.title),
            description = escape_html(&self.lesson.description),
            grammar = escape_html(&self.content.grammar),
            vocabulary = self.render_vocabulary(),
            reading = escape_html(&self.content.reading_passage),
            language = language,
            code = escape_html(&snippet.code),
            explanation = explanation,
            quiz = self.render_quiz(),
            summary = self.render_summary(),
            finish = self.render_finish(),
        )
    }
}
