use crate::checker::AnswerValue;
use crate::question::Question;
use crate::session::Answer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Correct/total pair for one breakdown bucket.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

/// The immutable summary of a finished session; the only thing the progress
/// ledger ever sees of it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionResult {
    pub total_score: u32,
    pub correct_count: u32,
    pub total_count: u32,
    pub accuracy: f64,
    pub duration_secs: u64,
    pub by_category: BTreeMap<String, Tally>,
    pub by_difficulty: BTreeMap<String, Tally>,
}

/// Reduce a question list and its answers into a `SessionResult`. An
/// unanswered tail (abandoned session) is padded with empty, incorrect
/// entries so the counts always cover every question.
pub fn summarize(questions: &[Question], answers: &[Answer]) -> SessionResult {
    let mut total_score = 0u32;
    let mut correct_count = 0u32;
    let mut duration_secs = 0u64;
    let mut by_category: BTreeMap<String, Tally> = BTreeMap::new();
    let mut by_difficulty: BTreeMap<String, Tally> = BTreeMap::new();

    for (index, question) in questions.iter().enumerate() {
        let padded;
        let answer = match answers.get(index) {
            Some(answer) => answer,
            None => {
                padded = Answer {
                    question_id: question.id.clone(),
                    value: AnswerValue::Empty,
                    time_spent_secs: 0,
                    is_correct: false,
                    points_awarded: 0,
                };
                &padded
            }
        };

        total_score += answer.points_awarded;
        duration_secs += u64::from(answer.time_spent_secs);
        if answer.is_correct {
            correct_count += 1;
        }

        let category = by_category.entry(question.category.clone()).or_default();
        category.total += 1;
        let difficulty = by_difficulty
            .entry(question.difficulty.as_str().to_string())
            .or_default();
        difficulty.total += 1;
        if answer.is_correct {
            category.correct += 1;
            difficulty.correct += 1;
        }
    }

    let total_count = questions.len() as u32;
    let accuracy = if total_count == 0 {
        0.0
    } else {
        f64::from(correct_count) / f64::from(total_count)
    };

    SessionResult {
        total_score,
        correct_count,
        total_count,
        accuracy,
        duration_secs,
        by_category,
        by_difficulty,
    }
}
