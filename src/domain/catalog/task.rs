//! Healing task catalog.
//!
//! Eighteen guided exercises, three per category, graded by difficulty. The
//! catalog entries are immutable templates; completion state lives on the
//! session (see `Session::task_progress`).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::question::{Category, Tier};
use crate::domain::foundation::TaskId;

/// Effort level of a healing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One healing task template. Immutable catalog entry, serialized for
/// display but never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealingTask {
    pub id: TaskId,
    pub category: Category,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub rationale: &'static str,
    pub tier: Tier,
}

/// A catalog task paired with a session's completion flag.
///
/// Derived view; the authoritative state is the session's task-progress map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    pub task: &'static HealingTask,
    pub completed: bool,
}

/// Number of tasks in the catalog.
pub fn task_count() -> usize {
    HEALING_TASKS.len()
}

/// Looks up a task by id.
pub fn task_by_id(id: TaskId) -> Option<&'static HealingTask> {
    HEALING_TASKS.iter().find(|t| t.id == id)
}

/// Annotates the full catalog with a session's completion flags, in catalog
/// order. Tasks absent from the map read as not completed.
pub fn task_statuses(progress: &BTreeMap<TaskId, bool>) -> Vec<TaskStatus> {
    HEALING_TASKS
        .iter()
        .map(|task| TaskStatus {
            task,
            completed: progress.get(&task.id).copied().unwrap_or(false),
        })
        .collect()
}

macro_rules! task {
    ($id:expr, $category:ident, $difficulty:ident, $tier:ident, $description:expr, $rationale:expr) => {
        HealingTask {
            id: TaskId::new($id),
            category: Category::$category,
            difficulty: Difficulty::$difficulty,
            description: $description,
            rationale: $rationale,
            tier: Tier::$tier,
        }
    };
}

/// The full ordered healing task catalog.
pub static HEALING_TASKS: Lazy<Vec<HealingTask>> = Lazy::new(|| {
    vec![
        // Communication
        task!(
            1,
            Communication,
            Easy,
            Free,
            "Spend 15 minutes sharing your day without phones or distractions",
            "Builds active listening and presence"
        ),
        task!(
            2,
            Communication,
            Medium,
            Premium,
            "Write each other a letter expressing what you miss most about the relationship",
            "Helps articulate feelings that are hard to say out loud"
        ),
        task!(
            3,
            Communication,
            Hard,
            Premium,
            "Have a 30-minute conversation about what led to the separation, using 'I feel' statements",
            "Addresses root issues with non-blaming language"
        ),
        // Trust
        task!(
            4,
            Trust,
            Easy,
            Free,
            "Share one thing you appreciate about your partner every day for a week",
            "Rebuilds positive associations and goodwill"
        ),
        task!(
            5,
            Trust,
            Medium,
            Premium,
            "Share one insecurity or fear you've been hiding from your partner",
            "Vulnerability builds deeper connection and trust"
        ),
        task!(
            6,
            Trust,
            Hard,
            Premium,
            "Discuss what trust means to each of you and create 3 specific trust-building commitments",
            "Establishes clear expectations and accountability"
        ),
        // Intimacy
        task!(
            7,
            Intimacy,
            Easy,
            Free,
            "Give each other a 5-minute shoulder massage",
            "Physical touch releases bonding hormones"
        ),
        task!(
            8,
            Intimacy,
            Medium,
            Premium,
            "Share your favorite memory together and why it was special",
            "Reconnects you with positive emotional history"
        ),
        task!(
            9,
            Intimacy,
            Hard,
            Premium,
            "Have an honest conversation about your physical and emotional intimacy needs",
            "Aligns expectations and desires"
        ),
        // Future
        task!(
            10,
            Future,
            Easy,
            Free,
            "Plan one fun activity to do together next week",
            "Creates something to look forward to together"
        ),
        task!(
            11,
            Future,
            Medium,
            Premium,
            "Each write down 3 goals for your relationship and compare them",
            "Ensures you're working toward the same vision"
        ),
        task!(
            12,
            Future,
            Hard,
            Premium,
            "Create a 'relationship vision board' together with images and words representing your ideal future",
            "Visualizes shared dreams and strengthens commitment"
        ),
        // Conflict resolution
        task!(
            13,
            Conflict,
            Easy,
            Free,
            "Practice the 'pause button' - when tension rises, take a 10-minute break before continuing",
            "Prevents escalation and allows emotions to settle"
        ),
        task!(
            14,
            Conflict,
            Medium,
            Premium,
            "Apologize for one specific thing you did that hurt your partner during the separation",
            "Taking accountability opens the door to healing"
        ),
        task!(
            15,
            Conflict,
            Hard,
            Premium,
            "Create a 'fair fighting' agreement with 5 rules you both commit to during disagreements",
            "Establishes healthy conflict patterns"
        ),
        // Quality time
        task!(
            16,
            QualityTime,
            Easy,
            Free,
            "Cook a meal together without any screens",
            "Teamwork and presence strengthen connection"
        ),
        task!(
            17,
            QualityTime,
            Medium,
            Premium,
            "Go on a 'first date' again - dress up, go somewhere special, pretend you're just getting to know each other",
            "Rekindles romance and excitement"
        ),
        task!(
            18,
            QualityTime,
            Hard,
            Premium,
            "Plan a weekend getaway together, even if it's just a staycation",
            "Extended quality time away from daily stressors deepens reconnection"
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eighteen_tasks() {
        assert_eq!(task_count(), 18);
    }

    #[test]
    fn task_ids_are_sequential_and_unique() {
        for (index, task) in HEALING_TASKS.iter().enumerate() {
            assert_eq!(task.id, TaskId::new(index as u32 + 1));
        }
    }

    #[test]
    fn each_category_has_three_tasks_at_distinct_difficulties() {
        for category in Category::ALL {
            let tasks: Vec<_> = HEALING_TASKS
                .iter()
                .filter(|t| t.category == category)
                .collect();
            assert_eq!(tasks.len(), 3, "category {:?}", category);

            let mut difficulties: Vec<_> = tasks.iter().map(|t| t.difficulty).collect();
            difficulties.sort();
            assert_eq!(
                difficulties,
                vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            );
        }
    }

    #[test]
    fn easy_tasks_are_free() {
        for task in HEALING_TASKS.iter() {
            if task.difficulty == Difficulty::Easy {
                assert_eq!(task.tier, Tier::Free);
            }
        }
    }

    #[test]
    fn lookup_by_id_finds_tasks() {
        let task = task_by_id(TaskId::new(16)).unwrap();
        assert_eq!(task.category, Category::QualityTime);
    }

    #[test]
    fn lookup_out_of_range_is_none() {
        assert!(task_by_id(TaskId::new(19)).is_none());
    }

    #[test]
    fn task_statuses_reflect_the_progress_map() {
        let mut progress = BTreeMap::new();
        progress.insert(TaskId::new(4), true);
        progress.insert(TaskId::new(7), false);

        let statuses = task_statuses(&progress);
        assert_eq!(statuses.len(), 18);
        for status in &statuses {
            assert_eq!(status.completed, status.task.id == TaskId::new(4));
        }
    }
}
