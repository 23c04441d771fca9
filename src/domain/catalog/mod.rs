//! Static catalogs: assessment questions and healing tasks.
//!
//! Both catalogs are fixed at process start and never mutated. All per-user
//! state (answers, completion flags) lives on the session aggregate.

mod question;
mod task;

pub use question::{
    question_by_id, question_count, Category, Question, Response, Tier, QUESTIONS,
};
pub use task::{
    task_by_id, task_count, task_statuses, Difficulty, HealingTask, TaskStatus, HEALING_TASKS,
};
