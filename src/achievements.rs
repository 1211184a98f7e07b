use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The metric family an achievement tracks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AchievementKind {
    StudyStreak,
    WordsMastered,
    PracticeCount,
    AccuracyRate,
    StudyTime,
    CategoryMastery { category: String },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AchievementStatus {
    Locked,
    InProgress,
    Unlocked,
}

/// Progress and status are re-derived from the ledger on every update and
/// only ever move forward: locked -> in-progress -> unlocked, with the
/// unlock stamped exactly once.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: AchievementKind,
    pub target: f64,
    pub progress: f64,
    pub status: AchievementStatus,
    pub reward_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Local>>,
}

impl Achievement {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        kind: AchievementKind,
        target: f64,
        reward_points: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind,
            target,
            progress: 0.0,
            status: AchievementStatus::Locked,
            reward_points,
            unlocked_at: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.status == AchievementStatus::Unlocked
    }

    /// Fold a freshly computed metric into this achievement. Returns `true`
    /// only on the evaluation that unlocks it; an already-unlocked
    /// achievement is left untouched. Progress is clamped to the target and
    /// never decreases, and a non-positive target unlocks immediately.
    pub fn update(&mut self, metric: f64, now: DateTime<Local>) -> bool {
        if self.is_unlocked() {
            return false;
        }
        if self.target <= 0.0 {
            self.progress = self.progress.max(0.0);
            self.status = AchievementStatus::Unlocked;
            self.unlocked_at = Some(now);
            return true;
        }
        self.progress = self.progress.max(metric.min(self.target));
        if self.progress >= self.target {
            self.status = AchievementStatus::Unlocked;
            self.unlocked_at = Some(now);
            true
        } else {
            self.status = if self.progress > 0.0 {
                AchievementStatus::InProgress
            } else {
                AchievementStatus::Locked
            };
            false
        }
    }

    /// Completion ratio for progress-bar rendering, 0-100.
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            100.0
        } else {
            (self.progress / self.target * 100.0).min(100.0)
        }
    }

    /// The default achievement table a fresh ledger starts with.
    pub fn default_set() -> Vec<Achievement> {
        vec![
            Achievement::new(
                "streak-3",
                "Warming Up",
                "Study three days in a row",
                AchievementKind::StudyStreak,
                3.0,
                30,
            ),
            Achievement::new(
                "streak-7",
                "On a Roll",
                "Study seven days in a row",
                AchievementKind::StudyStreak,
                7.0,
                70,
            ),
            Achievement::new(
                "streak-30",
                "Diamond Hands",
                "Study thirty days in a row",
                AchievementKind::StudyStreak,
                30.0,
                300,
            ),
            Achievement::new(
                "mastered-10",
                "Vocabulary Builder",
                "Master ten terms",
                AchievementKind::WordsMastered,
                10.0,
                50,
            ),
            Achievement::new(
                "mastered-50",
                "Lexicon Curator",
                "Master fifty terms",
                AchievementKind::WordsMastered,
                50.0,
                200,
            ),
            Achievement::new(
                "sessions-10",
                "Getting Started",
                "Finish ten practice sessions",
                AchievementKind::PracticeCount,
                10.0,
                50,
            ),
            Achievement::new(
                "sessions-50",
                "Grinder",
                "Finish fifty practice sessions",
                AchievementKind::PracticeCount,
                50.0,
                150,
            ),
            Achievement::new(
                "accuracy-90",
                "Sharp Eye",
                "Reach 90% overall accuracy",
                AchievementKind::AccuracyRate,
                90.0,
                100,
            ),
            Achievement::new(
                "study-time-600",
                "Deep Diver",
                "Study for ten hours in total",
                AchievementKind::StudyTime,
                600.0,
                150,
            ),
            Achievement::new(
                "defi-native",
                "DeFi Native",
                "Master ten DeFi terms",
                AchievementKind::CategoryMastery {
                    category: "defi".to_string(),
                },
                10.0,
                100,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streak_achievement(target: f64) -> Achievement {
        Achievement::new(
            "streak-test",
            "Streak",
            "Keep a streak",
            AchievementKind::StudyStreak,
            target,
            25,
        )
    }

    #[test]
    fn test_status_progression_is_monotone() {
        let mut a = streak_achievement(3.0);
        assert_eq!(a.status, AchievementStatus::Locked);

        assert!(!a.update(1.0, Local::now()));
        assert_eq!(a.status, AchievementStatus::InProgress);
        assert_eq!(a.progress, 1.0);

        // A broken streak must not pull progress back down.
        assert!(!a.update(0.0, Local::now()));
        assert_eq!(a.progress, 1.0);
        assert_eq!(a.status, AchievementStatus::InProgress);

        assert!(a.update(3.0, Local::now()));
        assert!(a.is_unlocked());
        assert!(a.unlocked_at.is_some());
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut a = streak_achievement(2.0);
        assert!(a.update(5.0, Local::now()));
        let stamped = a.unlocked_at;

        // Re-evaluating an unlocked achievement must not re-award or re-stamp.
        assert!(!a.update(10.0, Local::now()));
        assert_eq!(a.unlocked_at, stamped);
    }

    #[test]
    fn test_progress_is_clamped_to_target() {
        let mut a = streak_achievement(3.0);
        a.update(100.0, Local::now());
        assert_eq!(a.progress, 3.0);
        assert_eq!(a.percent(), 100.0);
    }

    #[test]
    fn test_non_positive_target_unlocks_on_first_evaluation() {
        let mut a = streak_achievement(0.0);
        assert!(a.update(0.0, Local::now()));
        assert!(a.is_unlocked());
        assert_eq!(a.percent(), 100.0);
    }

    #[test]
    fn test_default_set_covers_every_kind() {
        let set = Achievement::default_set();
        assert!(set.iter().any(|a| a.kind == AchievementKind::StudyStreak));
        assert!(set.iter().any(|a| a.kind == AchievementKind::WordsMastered));
        assert!(set.iter().any(|a| a.kind == AchievementKind::PracticeCount));
        assert!(set.iter().any(|a| a.kind == AchievementKind::AccuracyRate));
        assert!(set.iter().any(|a| a.kind == AchievementKind::StudyTime));
        assert!(set.iter().any(|a| matches!(
            a.kind,
            AchievementKind::CategoryMastery { .. }
        )));
        // Ids are unique; duplicated ids would double-award on unlock.
        let mut ids: Vec<&str> = set.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), set.len());
    }

    #[test]
    fn test_kind_serializes_with_kebab_case_tag() {
        let a = streak_achievement(3.0);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["kind"], "study-streak");

        let a = Achievement::new(
            "cat",
            "Cat",
            "Category",
            AchievementKind::CategoryMastery {
                category: "defi".into(),
            },
            1.0,
            10,
        );
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["kind"], "category-mastery");
        assert_eq!(json["category"], "defi");
    }
}
