use crate::checker::{self, AnswerValue};
use crate::error::AppError;
use crate::question::Question;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One recorded submission. Correctness and points are derived at record
/// time and never change afterwards.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
    pub time_spent_secs: u32,
    pub is_correct: bool,
    pub points_awarded: u32,
}

/// A timed run over a fixed question list. The index only moves forward,
/// one step per recorded answer; dropping the session at any point has no
/// side effects.
#[derive(Debug)]
pub struct PracticeSession {
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Answer>,
    started_at: DateTime<Local>,
    remaining_secs: u32,
    paused: bool,
}

impl PracticeSession {
    pub fn start(questions: Vec<Question>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::EmptyQuestionList);
        }
        let remaining_secs = questions[0].time_limit_secs;
        Ok(Self {
            questions,
            current_index: 0,
            answers: Vec::new(),
            started_at: Local::now(),
            remaining_secs,
            paused: false,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// Record an answer for the current question and advance. The submitted
    /// question id must match the current question; a submission for a
    /// question the session already moved past (e.g. it timed out first) is
    /// rejected without recording anything.
    pub fn submit(&mut self, question_id: &str, value: AnswerValue) -> Result<&Answer, AppError> {
        let (id_matches, time_spent) = match self.questions.get(self.current_index) {
            Some(q) => (
                q.id == question_id,
                q.time_limit_secs.saturating_sub(self.remaining_secs),
            ),
            None => return Err(AppError::SessionComplete),
        };
        if !id_matches {
            return Err(AppError::StaleAnswer(question_id.to_string()));
        }
        Ok(self.record(value, time_spent))
    }

    /// The countdown for the current question ran out: record an empty,
    /// incorrect answer and advance exactly one index.
    pub fn timeout(&mut self) -> Result<&Answer, AppError> {
        let time_spent = match self.questions.get(self.current_index) {
            Some(q) => q.time_limit_secs,
            None => return Err(AppError::SessionComplete),
        };
        Ok(self.record(AnswerValue::Empty, time_spent))
    }

    /// One countdown step, driven by the caller's timer. Does nothing while
    /// paused or complete. Reaching zero fires the timeout transition and
    /// returns the recorded answer.
    pub fn tick(&mut self) -> Option<&Answer> {
        if self.paused || self.is_complete() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            let time_spent = self.questions[self.current_index].time_limit_secs;
            return Some(self.record(AnswerValue::Empty, time_spent));
        }
        None
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn record(&mut self, value: AnswerValue, time_spent_secs: u32) -> &Answer {
        let question = &self.questions[self.current_index];
        let is_correct = checker::is_correct(question, &value);
        let answer = Answer {
            question_id: question.id.clone(),
            value,
            time_spent_secs,
            is_correct,
            points_awarded: if is_correct { question.points } else { 0 },
        };
        let index = self.answers.len();
        self.answers.push(answer);
        self.current_index += 1;
        self.remaining_secs = self
            .questions
            .get(self.current_index)
            .map(|q| q.time_limit_secs)
            .unwrap_or(0);
        &self.answers[index]
    }
}
