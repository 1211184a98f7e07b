use crate::achievements::Achievement;
use crate::checker::AnswerValue;
use crate::error::AppError;
use crate::progress::UserProgress;
use crate::question::Question;
use crate::scoring::{self, SessionResult};
use crate::session::{Answer, PracticeSession};
use crate::storage::ProgressStore;
use crate::vocabulary::VocabularyProvider;
use chrono::Local;
use log::warn;
use std::collections::BTreeSet;

/// The object the UI layer drives. Owns the ledger, the live session (if
/// any), and the storage and vocabulary collaborators; every operation runs
/// synchronously inside the caller's event handler.
pub struct Trainer {
    progress: UserProgress,
    session: Option<PracticeSession>,
    store: Box<dyn ProgressStore>,
    vocab: Box<dyn VocabularyProvider>,
    newly_unlocked: Vec<Achievement>,
    load_failed: bool,
}

impl Trainer {
    /// Load the ledger from the store. A missing record starts an empty
    /// ledger; a corrupt one also starts empty but raises the non-fatal
    /// `load_failed` signal so the UI can tell the user.
    pub fn open(store: Box<dyn ProgressStore>, vocab: Box<dyn VocabularyProvider>) -> Self {
        let (mut progress, load_failed) = match store.load() {
            Ok(Some(progress)) => (progress, false),
            Ok(None) => (UserProgress::new(), false),
            Err(e) => {
                warn!("could not load progress, starting fresh: {e}");
                (UserProgress::new(), true)
            }
        };
        // A ledger saved days ago may carry a streak that has since lapsed.
        progress.recalculate_streak(Local::now().date_naive());
        Self {
            progress,
            session: None,
            store,
            vocab,
            newly_unlocked: Vec::new(),
            load_failed,
        }
    }

    /// True when the stored ledger existed but could not be read.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Begin a new practice run. Any previous in-progress session is
    /// discarded, never recorded.
    pub fn start_session(&mut self, questions: Vec<Question>) -> Result<(), AppError> {
        self.session = Some(PracticeSession::start(questions)?);
        self.newly_unlocked.clear();
        Ok(())
    }

    pub fn session(&self) -> Option<&PracticeSession> {
        self.session.as_ref()
    }

    pub fn submit_answer(
        &mut self,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<&Answer, AppError> {
        match self.session.as_mut() {
            Some(session) => session.submit(question_id, value),
            None => Err(AppError::NoActiveSession),
        }
    }

    pub fn timeout_current_question(&mut self) -> Result<&Answer, AppError> {
        match self.session.as_mut() {
            Some(session) => session.timeout(),
            None => Err(AppError::NoActiveSession),
        }
    }

    /// One countdown step; returns the auto-recorded answer when the current
    /// question just timed out.
    pub fn tick(&mut self) -> Option<&Answer> {
        self.session.as_mut()?.tick()
    }

    pub fn pause_timer(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pause();
        }
    }

    pub fn resume_timer(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.resume();
        }
    }

    /// Summary of the current session so far. Unanswered questions count as
    /// incorrect, so this is also usable for a partial preview before the
    /// session completes.
    pub fn session_result(&self) -> Result<SessionResult, AppError> {
        let session = self.session.as_ref().ok_or(AppError::NoActiveSession)?;
        Ok(scoring::summarize(session.questions(), session.answers()))
    }

    /// Fold the completed session into the ledger and persist it. The next
    /// ledger state is computed on a copy and swapped in whole, so a failure
    /// partway can never leave the ledger half-updated. A failed save keeps
    /// the in-memory state, logs a warning and still returns the result; the
    /// previously persisted record is untouched.
    ///
    /// `mastered` and `weak` are the caller's accuracy bookkeeping (mastery
    /// at >= 0.8 accuracy per word); only complete sessions can be recorded,
    /// abandoned ones are dropped via `abandon_session`.
    pub fn record_session_into_ledger(
        &mut self,
        words_studied: &BTreeSet<String>,
        mastered: &BTreeSet<String>,
        weak: &BTreeSet<String>,
    ) -> Result<SessionResult, AppError> {
        let Some(session) = self.session.take() else {
            return Err(AppError::NoActiveSession);
        };
        if !session.is_complete() {
            self.session = Some(session);
            return Err(AppError::SessionIncomplete);
        }

        let ended_at = Local::now();
        let result = scoring::summarize(session.questions(), session.answers());

        let mut next = self.progress.clone();
        let newly_unlocked = next.record_session(
            &result,
            words_studied,
            mastered,
            weak,
            session.started_at(),
            ended_at,
            self.vocab.as_ref(),
        );
        self.progress = next;
        self.newly_unlocked = newly_unlocked;

        if let Err(e) = self.store.save(&self.progress) {
            warn!("failed to save progress: {e}");
        }
        Ok(result)
    }

    /// Drop the in-progress session without touching the ledger.
    pub fn abandon_session(&mut self) {
        self.session = None;
    }

    /// Achievements unlocked by the most recent recorded session.
    pub fn newly_unlocked(&self) -> &[Achievement] {
        &self.newly_unlocked
    }

    pub fn current_streak(&self) -> u32 {
        self.progress.current_streak
    }

    pub fn stats(&self) -> &UserProgress {
        &self.progress
    }
}
