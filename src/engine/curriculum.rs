use serde::{Deserialize, Serialize};

/// Number of days in the plan. Lesson ids run from "1" to this value.
pub const CURRICULUM_DAYS: u32 = 30;

// --- Lesson Status ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Locked,
    Available,
    Completed,
}

impl LessonStatus {
    pub fn to_key(self) -> &'static str {
        match self {
            LessonStatus::Locked => "locked",
            LessonStatus::Available => "available",
            LessonStatus::Completed => "completed",
        }
    }

    pub fn is_locked(self) -> bool {
        matches!(self, LessonStatus::Locked)
    }
}

// --- CEFR Level ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CefrLevel {
    A2,
    B1,
}

impl CefrLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
        }
    }
}

// --- Static Definitions ---

pub struct LessonDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub level: CefrLevel,
    pub topic: &'static str,
}

const CURATED_LESSONS: &[LessonDefinition] = &[
    LessonDefinition {
        title: "Defining Your Environment",
        description: "Mastering \"To Be\" and present simple in technical setups.",
        level: CefrLevel::A2,
        topic: "Initial Setup",
    },
    LessonDefinition {
        title: "The Loop Concept",
        description: "Using present continuous to describe running processes.",
        level: CefrLevel::A2,
        topic: "Runtime Description",
    },
    LessonDefinition {
        title: "Debugging the Past",
        description: "Past simple vs Past continuous for error logs.",
        level: CefrLevel::B1,
        topic: "Past Logs",
    },
    LessonDefinition {
        title: "Predicting Outputs",
        description: "Future with \"will\" and \"going to\" for app outcomes.",
        level: CefrLevel::B1,
        topic: "Project Roadmap",
    },
    LessonDefinition {
        title: "HTML Semantics",
        description: "Describing structure using relative clauses.",
        level: CefrLevel::B1,
        topic: "Web Structure",
    },
];

const TEMPLATED_TOPIC: &str = "Continuous Improvement";

// --- Lesson ---

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub day: u32,
    pub title: String,
    pub description: String,
    pub level: CefrLevel,
    pub topic: String,
    pub status: LessonStatus,
}

impl Lesson {
    fn from_definition(day: u32, def: &LessonDefinition) -> Self {
        Self {
            id: day.to_string(),
            day,
            title: def.title.to_string(),
            description: def.description.to_string(),
            level: def.level,
            topic: def.topic.to_string(),
            status: LessonStatus::Locked,
        }
    }

    fn templated(day: u32) -> Self {
        Self {
            id: day.to_string(),
            day,
            title: format!("Step {day}: Advanced Dev Flow"),
            description: format!("Leveling up your English communication for Day {day}."),
            level: CefrLevel::B1,
            topic: TEMPLATED_TOPIC.to_string(),
            status: LessonStatus::Locked,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }
}

/// Build the full catalog in day order. Day 1 starts available.
pub fn initialize_lessons() -> Vec<Lesson> {
    let mut lessons: Vec<Lesson> = (1..=CURRICULUM_DAYS)
        .map(|day| match CURATED_LESSONS.get(day as usize - 1) {
            Some(def) => Lesson::from_definition(day, def),
            None => Lesson::templated(day),
        })
        .collect();

    if let Some(first) = lessons.first_mut() {
        first.status = LessonStatus::Available;
    }
    lessons
}

/// Id of the lesson that follows `lesson_id`. None past the last day or for
/// ids that are not day numbers.
pub fn next_lesson_id(lesson_id: &str) -> Option<String> {
    let day: u32 = lesson_id.parse().ok()?;
    (1..CURRICULUM_DAYS).contains(&day).then(|| (day + 1).to_string())
}
