use crate::achievements::{Achievement, AchievementKind};
use crate::scoring::SessionResult;
use crate::vocabulary::VocabularyProvider;
use chrono::{DateTime, Duration, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One finished study sitting, append-only.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StudySession {
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub duration_secs: u64,
}

/// Per-calendar-date counters, keyed by the user's local date. Created
/// lazily on the first event of a day and updated in place afterwards.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub words_studied: u32,
    pub practice_sessions: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub study_time_minutes: u32,
    pub new_mastered_words: u32,
}

impl DailyStats {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            words_studied: 0,
            practice_sessions: 0,
            correct_answers: 0,
            total_answers: 0,
            study_time_minutes: 0,
            new_mastered_words: 0,
        }
    }
}

/// The long-lived per-user ledger, persisted as one JSON document.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserProgress {
    #[serde(default)]
    pub study_sessions: Vec<StudySession>,
    #[serde(default)]
    pub daily_stats: BTreeMap<NaiveDate, DailyStats>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub max_streak: u32,
    #[serde(default)]
    pub mastered_words: BTreeSet<String>,
    #[serde(default)]
    pub weak_words: BTreeSet<String>,
    #[serde(default)]
    pub total_study_minutes: u64,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub level_exp: u32,
    #[serde(default = "default_next_level_exp")]
    pub next_level_exp: u32,
    #[serde(default = "Achievement::default_set")]
    pub achievements: Vec<Achievement>,
}

fn default_level() -> u32 {
    1
}

fn default_next_level_exp() -> u32 {
    100
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl UserProgress {
    pub fn new() -> Self {
        Self {
            study_sessions: Vec::new(),
            daily_stats: BTreeMap::new(),
            current_streak: 0,
            max_streak: 0,
            mastered_words: BTreeSet::new(),
            weak_words: BTreeSet::new(),
            total_study_minutes: 0,
            total_points: 0,
            level: 1,
            level_exp: 0,
            next_level_exp: 100,
            achievements: Achievement::default_set(),
        }
    }

    /// Fold one finished session into the ledger: append the study session,
    /// update the day's counters, refresh the streak and mastered/weak sets,
    /// then re-evaluate achievements. Returns the newly unlocked ones.
    ///
    /// Word ids are stored as given; validating them against the glossary is
    /// the vocabulary service's job.
    pub fn record_session(
        &mut self,
        result: &SessionResult,
        words_studied: &BTreeSet<String>,
        mastered: &BTreeSet<String>,
        weak: &BTreeSet<String>,
        started_at: DateTime<Local>,
        ended_at: DateTime<Local>,
        vocab: &dyn VocabularyProvider,
    ) -> Vec<Achievement> {
        let duration_secs = (ended_at - started_at).num_seconds().max(0) as u64;
        self.study_sessions.push(StudySession {
            started_at,
            ended_at,
            duration_secs,
        });

        let newly_mastered = mastered
            .iter()
            .filter(|id| !self.mastered_words.contains(*id))
            .count() as u32;
        for id in mastered {
            self.mastered_words.insert(id.clone());
            self.weak_words.remove(id);
        }
        for id in weak {
            if !self.mastered_words.contains(id) {
                self.weak_words.insert(id.clone());
            }
        }

        let today = ended_at.date_naive();
        let day = self
            .daily_stats
            .entry(today)
            .or_insert_with(|| DailyStats::new(today));
        day.words_studied += words_studied.len() as u32;
        day.practice_sessions += 1;
        day.correct_answers += result.correct_count;
        day.total_answers += result.total_count;
        day.study_time_minutes += (duration_secs / 60) as u32;
        day.new_mastered_words += newly_mastered;

        self.total_study_minutes += duration_secs / 60;
        self.recalculate_streak(today);

        self.evaluate_achievements(vocab)
    }

    fn words_studied_on(&self, date: NaiveDate) -> u32 {
        self.daily_stats
            .get(&date)
            .map(|d| d.words_studied)
            .unwrap_or(0)
    }

    /// Walk backward over the daily stats counting consecutive study days.
    /// A quiet today doesn't break the chain yet; the walk just starts at
    /// yesterday. Max streak only ever ratchets up.
    pub fn recalculate_streak(&mut self, today: NaiveDate) {
        let mut day = today;
        if self.words_studied_on(day) == 0 {
            day = day - Duration::days(1);
        }
        let mut streak = 0u32;
        while self.words_studied_on(day) > 0 {
            streak += 1;
            day = day - Duration::days(1);
        }
        self.current_streak = streak;
        self.max_streak = self.max_streak.max(streak);
    }

    /// Overall accuracy across all recorded days, as a percentage.
    pub fn overall_accuracy_percent(&self) -> f64 {
        let total: u64 = self
            .daily_stats
            .values()
            .map(|d| u64::from(d.total_answers))
            .sum();
        if total == 0 {
            return 0.0;
        }
        let correct: u64 = self
            .daily_stats
            .values()
            .map(|d| u64::from(d.correct_answers))
            .sum();
        correct as f64 / total as f64 * 100.0
    }

    /// Re-derive every achievement from the current ledger snapshot and
    /// award points for the ones that just unlocked. Safe to call any number
    /// of times; an unchanged ledger yields no new unlocks.
    pub fn evaluate_achievements(&mut self, vocab: &dyn VocabularyProvider) -> Vec<Achievement> {
        let now = Local::now();
        let mut achievements = std::mem::take(&mut self.achievements);
        let mut newly_unlocked = Vec::new();
        let mut awarded = 0u32;

        for achievement in &mut achievements {
            let metric = self.metric_for(&achievement.kind, vocab);
            if achievement.update(metric, now) {
                debug!("achievement unlocked: {}", achievement.id);
                awarded += achievement.reward_points;
                newly_unlocked.push(achievement.clone());
            }
        }

        self.achievements = achievements;
        self.total_points += awarded;
        self.recalculate_level();
        newly_unlocked
    }

    fn metric_for(&self, kind: &AchievementKind, vocab: &dyn VocabularyProvider) -> f64 {
        match kind {
            AchievementKind::StudyStreak => f64::from(self.current_streak),
            AchievementKind::WordsMastered => self.mastered_words.len() as f64,
            AchievementKind::PracticeCount => self.study_sessions.len() as f64,
            AchievementKind::AccuracyRate => self.overall_accuracy_percent(),
            AchievementKind::StudyTime => self.total_study_minutes as f64,
            AchievementKind::CategoryMastery { category } => self
                .mastered_words
                .iter()
                .filter(|id| vocab.category_of(id) == Some(category.as_str()))
                .count() as f64,
        }
    }

    pub fn recalculate_level(&mut self) {
        let (level, level_exp, next_level_exp) = level_for_points(self.total_points);
        self.level = level;
        self.level_exp = level_exp;
        self.next_level_exp = next_level_exp;
    }
}

/// Level from total reward points. Advancing out of level `n` costs
/// `n * 100` points, so the experience shown inside the current level plus
/// everything spent on earlier levels always equals the total.
pub fn level_for_points(points: u32) -> (u32, u32, u32) {
    let mut level = 1u32;
    let mut remaining = points;
    while remaining >= level * 100 {
        remaining -= level * 100;
        level += 1;
    }
    (level, remaining, level * 100)
}
