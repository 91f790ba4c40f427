use crate::generator::GenerationError;
use crate::session::request::{RequestKind, RequestToken};

/// Names of the interactions the rendered markup can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SelectLesson,
    GoDashboard,
    FinishLesson,
    StartChat,
    Retry,
    AnswerQuiz,
}

impl ActionKind {
    pub fn to_key(self) -> &'static str {
        match self {
            ActionKind::SelectLesson => "select_lesson",
            ActionKind::GoDashboard => "go_dashboard",
            ActionKind::FinishLesson => "finish_lesson",
            ActionKind::StartChat => "start_chat",
            ActionKind::Retry => "retry",
            ActionKind::AnswerQuiz => "answer_quiz",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "select_lesson" => Some(ActionKind::SelectLesson),
            "go_dashboard" => Some(ActionKind::GoDashboard),
            "finish_lesson" => Some(ActionKind::FinishLesson),
            "start_chat" => Some(ActionKind::StartChat),
            "retry" => Some(ActionKind::Retry),
            "answer_quiz" => Some(ActionKind::AnswerQuiz),
            _ => None,
        }
    }

    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::SelectLesson,
            ActionKind::GoDashboard,
            ActionKind::FinishLesson,
            ActionKind::StartChat,
            ActionKind::Retry,
            ActionKind::AnswerQuiz,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectLesson(String),
    GoDashboard,
    FinishLesson,
    StartChat,
    Retry,
    AnswerQuiz { question: usize, option: usize },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SelectLesson(_) => ActionKind::SelectLesson,
            Action::GoDashboard => ActionKind::GoDashboard,
            Action::FinishLesson => ActionKind::FinishLesson,
            Action::StartChat => ActionKind::StartChat,
            Action::Retry => ActionKind::Retry,
            Action::AnswerQuiz { .. } => ActionKind::AnswerQuiz,
        }
    }

    /// Build an action from the `data-action` / `data-arg` pair carried by markup.
    pub fn parse(name: &str, arg: Option<&str>) -> Option<Self> {
        let arg = arg.map(str::trim).filter(|a| !a.is_empty());
        match ActionKind::from_key(name)? {
            ActionKind::SelectLesson => Some(Action::SelectLesson(arg?.to_string())),
            ActionKind::GoDashboard => Some(Action::GoDashboard),
            ActionKind::FinishLesson => Some(Action::FinishLesson),
            ActionKind::StartChat => Some(Action::StartChat),
            ActionKind::Retry => Some(Action::Retry),
            ActionKind::AnswerQuiz => {
                let (question, option) = arg?.split_once(':')?;
                Some(Action::AnswerQuiz {
                    question: question.parse().ok()?,
                    option: option.parse().ok()?,
                })
            }
        }
    }

    /// The `data-arg` value that [`Action::parse`] reads back.
    pub fn arg(&self) -> Option<String> {
        match self {
            Action::SelectLesson(id) => Some(id.clone()),
            Action::AnswerQuiz { question, option } => Some(format!("{question}:{option}")),
            _ => None,
        }
    }
}

/// Outcome of a generation call, delivered back to the controller.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub token: RequestToken,
    pub kind: RequestKind,
    pub lesson_id: String,
    pub result: Result<String, GenerationError>,
}

#[derive(Debug)]
pub enum AppEvent {
    Action(Action),
    Generated(GenerationOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys_roundtrip() {
        for &kind in ActionKind::all() {
            assert_eq!(ActionKind::from_key(kind.to_key()), Some(kind));
        }
        assert_eq!(ActionKind::from_key("open_chat"), None);
    }

    #[test]
    fn test_parse_select_lesson() {
        assert_eq!(
            Action::parse("select_lesson", Some("7")),
            Some(Action::SelectLesson("7".to_string()))
        );
        assert_eq!(Action::parse("select_lesson", None), None);
        assert_eq!(Action::parse("select_lesson", Some("  ")), None);
    }

    #[test]
    fn test_parse_answer_quiz() {
        assert_eq!(
            Action::parse("answer_quiz", Some("1:2")),
            Some(Action::AnswerQuiz {
                question: 1,
                option: 2
            })
        );
        assert_eq!(Action::parse("answer_quiz", Some("1")), None);
        assert_eq!(Action::parse("answer_quiz", Some("a:b")), None);
    }

    #[test]
    fn test_parse_ignores_arg_for_plain_actions() {
        assert_eq!(
            Action::parse("go_dashboard", Some("x")),
            Some(Action::GoDashboard)
        );
        assert_eq!(Action::parse("unknown", None), None);
    }

    #[test]
    fn test_arg_matches_parse() {
        let action = Action::AnswerQuiz {
            question: 0,
            option: 3,
        };
        let arg = action.arg();
        assert_eq!(Action::parse("answer_quiz", arg.as_deref()), Some(action));
    }
}
