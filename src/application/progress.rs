//! ProgressService - healing tasks, streaks, and milestones.

use std::sync::Arc;

use tracing::info;

use crate::application::repository;
use crate::domain::catalog::{task_statuses, TaskStatus};
use crate::domain::foundation::{SessionCode, TaskId, Timestamp};
use crate::domain::progress::Milestone;
use crate::domain::session::{Session, SessionError};
use crate::ports::KeyValueStore;

/// Result of marking a task done.
#[derive(Debug, Clone)]
pub struct TaskCompletionOutcome {
    pub session: Session,
    /// Milestones crossed by this completion, lowest threshold first.
    pub new_milestones: Vec<Milestone>,
}

/// Progress summary for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Streak after accounting for a lapse since the last activity.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_tasks_completed: u32,
    pub milestones: Vec<Milestone>,
}

/// Service for the healing-task journey attached to a session.
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Marks a task complete, advancing the streak and awarding any
    /// milestones the new streak crosses. Completing an already-complete
    /// task still counts as activity for the day.
    pub async fn complete_task(
        &self,
        code: &SessionCode,
        task_id: TaskId,
    ) -> Result<TaskCompletionOutcome, SessionError> {
        let mut session = repository::load_session(self.store.as_ref(), code).await?;
        let new_milestones = session.complete_task(task_id, &Timestamp::now())?;
        repository::save_session(self.store.as_ref(), &session).await?;
        if !new_milestones.is_empty() {
            info!(code = %code, milestones = ?new_milestones, "milestones reached");
        }
        Ok(TaskCompletionOutcome {
            session,
            new_milestones,
        })
    }

    /// The full task catalog annotated with this session's completion flags.
    pub async fn task_statuses(
        &self,
        code: &SessionCode,
    ) -> Result<Vec<TaskStatus>, SessionError> {
        let session = repository::load_session(self.store.as_ref(), code).await?;
        Ok(task_statuses(session.task_progress()))
    }

    /// Streak counters as of now. A lapse of more than one calendar day
    /// reads as zero without mutating the stored record.
    pub async fn summary(&self, code: &SessionCode) -> Result<ProgressSummary, SessionError> {
        let session = repository::load_session(self.store.as_ref(), code).await?;
        let now = Timestamp::now();
        Ok(ProgressSummary {
            current_streak: session.current_streak(&now),
            longest_streak: session.longest_streak(),
            total_tasks_completed: session.total_tasks_completed(),
            milestones: session.milestones().to_vec(),
        })
    }
}
