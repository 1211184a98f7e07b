use crate::vocabulary::{Difficulty, VocabWord};
use serde::{Deserialize, Serialize};

/// Countdown used when a question does not specify its own limit
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// A single quiz item. The variant payload lives in `kind`; the serialized
/// form carries a `type` discriminant and only the active variant's fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub word_id: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub points: u32,
    pub time_limit_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_index: usize,
    },
    FillBlank {
        template: String,
        blanks: Vec<Blank>,
    },
    Listening {
        audio_id: String,
        transcript: String,
        #[serde(default)]
        max_plays: Option<u32>,
    },
    DragOrder {
        items: Vec<OrderItem>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Blank {
    pub answer: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderItem {
    pub id: String,
    pub correct_position: usize,
}

impl Question {
    pub fn new(id: &str, prompt: &str, word: &VocabWord, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            word_id: word.id.clone(),
            difficulty: word.difficulty,
            category: word.category.clone(),
            points: points_for(word.difficulty),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            explanation: None,
            kind,
        }
    }

    pub fn multiple_choice(
        id: &str,
        prompt: &str,
        word: &VocabWord,
        options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        Self::new(
            id,
            prompt,
            word,
            QuestionKind::MultipleChoice {
                options,
                correct_index,
            },
        )
    }

    pub fn fill_blank(
        id: &str,
        prompt: &str,
        word: &VocabWord,
        template: &str,
        blanks: Vec<Blank>,
    ) -> Self {
        Self::new(
            id,
            prompt,
            word,
            QuestionKind::FillBlank {
                template: template.to_string(),
                blanks,
            },
        )
    }

    pub fn listening(
        id: &str,
        prompt: &str,
        word: &VocabWord,
        audio_id: &str,
        transcript: &str,
    ) -> Self {
        Self::new(
            id,
            prompt,
            word,
            QuestionKind::Listening {
                audio_id: audio_id.to_string(),
                transcript: transcript.to_string(),
                max_plays: None,
            },
        )
    }

    pub fn drag_order(id: &str, prompt: &str, word: &VocabWord, items: Vec<OrderItem>) -> Self {
        Self::new(id, prompt, word, QuestionKind::DragOrder { items })
    }
}

/// Point value by difficulty tier.
pub fn points_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 10,
        Difficulty::Intermediate => 20,
        Difficulty::Advanced => 30,
    }
}
