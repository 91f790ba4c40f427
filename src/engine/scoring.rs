use crate::engine::curriculum::CURRICULUM_DAYS;

/// XP awarded for each newly completed lesson.
pub const XP_PER_LESSON: u32 = 10;

/// Percentage of the plan completed, truncated toward zero.
pub fn completion_rate(completed_count: usize) -> u32 {
    let completed = (completed_count as u32).min(CURRICULUM_DAYS);
    completed * 100 / CURRICULUM_DAYS
}

/// Fraction of quiz answers that were correct, for display.
pub fn quiz_ratio(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64).clamp(0.0, 1.0)
}
