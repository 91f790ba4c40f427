use std::fmt;

use crate::generator::Prompt;

/// Identity of one generation call. Tokens only ever increase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    LessonContent,
    Summary,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::LessonContent => "lesson_content",
            RequestKind::Summary => "summary",
        }
    }
}

/// A generation call the runtime should perform on the controller's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub token: RequestToken,
    pub kind: RequestKind,
    pub lesson_id: String,
    pub prompt: Prompt,
}

/// Hands out tokens and remembers which one is current for each kind.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    content: Option<(RequestToken, String)>,
    summary: Option<(RequestToken, String)>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: RequestKind, lesson_id: &str, prompt: Prompt) -> GenerationRequest {
        self.next += 1;
        let token = RequestToken(self.next);
        let slot = (token, lesson_id.to_string());
        match kind {
            RequestKind::LessonContent => self.content = Some(slot),
            RequestKind::Summary => self.summary = Some(slot),
        }
        GenerationRequest {
            token,
            kind,
            lesson_id: lesson_id.to_string(),
            prompt,
        }
    }

    /// True if a content request for this lesson is still outstanding.
    pub fn content_pending_for(&self, lesson_id: &str) -> bool {
        matches!(&self.content, Some((_, id)) if id == lesson_id)
    }

    pub fn summary_pending(&self) -> bool {
        self.summary.is_some()
    }

    /// Consume the active slot if `token` is the current request of `kind`
    /// for `lesson_id`. Anything else is stale.
    pub fn settle(&mut self, kind: RequestKind, token: RequestToken, lesson_id: &str) -> bool {
        let slot = match kind {
            RequestKind::LessonContent => &mut self.content,
            RequestKind::Summary => &mut self.summary,
        };
        let current = matches!(slot.as_ref(), Some((active, id)) if *active == token && id == lesson_id);
        if current {
            *slot = None;
        }
        current
    }

    /// Forget the outstanding request of `kind`; its response will be dropped.
    pub fn cancel(&mut self, kind: RequestKind) {
        match kind {
            RequestKind::LessonContent => self.content = None,
            RequestKind::Summary => self.summary = None,
        }
    }
}
