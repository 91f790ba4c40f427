use crate::engine::curriculum::{CURRICULUM_DAYS, Lesson};
use crate::generator::schema::GeneratedContent;

/// Number of vocabulary words quoted back in the summary prompt.
const SUMMARY_VOCABULARY_WORDS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseFormat {
    /// A lesson payload matching [`GeneratedContent`].
    Json,
    /// Free text shown verbatim.
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub format: ResponseFormat,
}

impl Prompt {
    pub fn lesson(lesson: &Lesson) -> Self {
        let text = format!(
            "Generate an English lesson for a software developer aiming to move from A2 to B1 level.\n\
             This is Day {day} of a {total}-day plan. The topic is: {topic}.\n\
             The lesson must include:\n\
             1. A grammar explanation suitable for B1 (Intermediate).\n\
             2. 5-7 technical vocabulary words.\n\
             3. A short reading passage related to programming (Python or HTML context).\n\
             4. A code snippet (Python or HTML) that uses the grammar/vocabulary in comments or logic.\n\
             5. 3 multiple-choice quiz questions.\n\
             Respond with JSON using the fields grammar, vocabulary, readingPassage, \
             codeSnippet {{language, code, explanation}} and quiz \
             [{{question, options, correctAnswer, explanation}}].",
            day = lesson.day,
            total = CURRICULUM_DAYS,
            topic = lesson.topic,
        );
        Self {
            text,
            format: ResponseFormat::Json,
        }
    }

    /// `score` is `(correct, answered)` when the learner took the quiz.
    pub fn summary(content: &GeneratedContent, score: Option<(usize, usize)>) -> Self {
        let words = content.leading_vocabulary(SUMMARY_VOCABULARY_WORDS).join(", ");
        let mut text = format!(
            "Provide a brief B1 level performance summary for a developer who finished a lesson on {grammar}. \
             Use words like {words}.",
            grammar = content.grammar,
        );
        if let Some((correct, answered)) = score {
            text.push_str(&format!(
                " They answered {correct} of {answered} quiz questions correctly."
            ));
        }
        text.push_str(" Keep it encouraging and under 80 words.");
        Self {
            text,
            format: ResponseFormat::Text,
        }
    }
}
