pub mod curriculum;
pub mod scoring;

pub use curriculum::{CefrLevel, Lesson, LessonStatus};
