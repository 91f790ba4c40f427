use crate::generator::QuizQuestion;

/// Answers given to the generated quiz of the lesson on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizProgress {
    answers: Vec<Option<usize>>,
    correct: Vec<bool>,
}

impl QuizProgress {
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: vec![None; question_count],
            correct: vec![false; question_count],
        }
    }

    /// Record the learner's choice. Only the first answer to a question counts.
    ///
    /// Returns whether the answer was correct, or None if it was ignored.
    pub fn answer(
        &mut self,
        questions: &[QuizQuestion],
        question: usize,
        option: usize,
    ) -> Option<bool> {
        let q = questions.get(question)?;
        if option >= q.options.len() {
            return None;
        }
        let slot = self.answers.get_mut(question)?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(option);
        let correct = option == q.correct_answer;
        self.correct[question] = correct;
        Some(correct)
    }

    pub fn selected(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn score(&self) -> usize {
        self.correct.iter().filter(|c| **c).count()
    }

    pub fn total(&self) -> usize {
        self.answers.len()
    }

    /// `(correct, answered)` once at least one question has been answered.
    pub fn result(&self) -> Option<(usize, usize)> {
        match self.answered() {
            0 => None,
            n => Some((self.score(), n)),
        }
    }
}
