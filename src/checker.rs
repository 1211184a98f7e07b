use crate::question::{Question, QuestionKind};
use serde::{Deserialize, Serialize};

/// What the user handed in for one question. A timed-out question records
/// `Empty`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "form", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Empty,
    Choice(usize),
    Text(String),
    Sequence(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, AnswerValue::Empty)
    }
}

/// Pure correctness check. Dispatches on the question's variant tag only;
/// a wrong-shaped or empty submission is incorrect, never an error.
pub fn is_correct(question: &Question, answer: &AnswerValue) -> bool {
    match &question.kind {
        QuestionKind::MultipleChoice { correct_index, .. } => match answer {
            AnswerValue::Choice(index) => index == correct_index,
            // Forms often deliver the selected index as its raw string.
            AnswerValue::Text(s) => s
                .trim()
                .parse::<usize>()
                .map(|index| index == *correct_index)
                .unwrap_or(false),
            _ => false,
        },
        QuestionKind::FillBlank { blanks, .. } => match answer {
            AnswerValue::Sequence(values) => {
                values.len() == blanks.len()
                    && values
                        .iter()
                        .zip(blanks)
                        .all(|(value, blank)| normalized_eq(value, &blank.answer))
            }
            _ => false,
        },
        QuestionKind::Listening { transcript, .. } => match answer {
            AnswerValue::Text(s) => normalized_eq(s, transcript),
            _ => false,
        },
        QuestionKind::DragOrder { items } => match answer {
            AnswerValue::Sequence(ids) => {
                ids.len() == items.len()
                    && (0..items.len()).all(|position| {
                        items
                            .iter()
                            .find(|item| item.correct_position == position)
                            .is_some_and(|item| item.id == ids[position])
                    })
            }
            _ => false,
        },
    }
}

/// Trimmed, case-insensitive comparison for typed answers.
fn normalized_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Blank, OrderItem, Question};
    use crate::vocabulary::{Glossary, VocabularyProvider};

    fn mc_question() -> Question {
        let glossary = Glossary::builtin();
        Question::multiple_choice(
            "mc1",
            "What does AMM stand for?",
            glossary.word("amm").unwrap(),
            vec![
                "Automated Market Maker".into(),
                "Asset Management Module".into(),
                "Atomic Mint Mechanism".into(),
            ],
            0,
        )
    }

    fn fill_blank_question() -> Question {
        let glossary = Glossary::builtin();
        Question::fill_blank(
            "fb1",
            "Complete the sentence",
            glossary.word("stablecoin").unwrap(),
            "Decentralized finance is usually shortened to ___.",
            vec![Blank {
                answer: "DeFi".into(),
                hints: vec![],
            }],
        )
    }

    fn listening_question() -> Question {
        let glossary = Glossary::builtin();
        Question::listening(
            "ls1",
            "Type what you hear",
            glossary.word("gas").unwrap(),
            "audio/gas.mp3",
            "gas",
        )
    }

    fn drag_order_question() -> Question {
        let glossary = Glossary::builtin();
        Question::drag_order(
            "do1",
            "Order the swap lifecycle",
            glossary.word("dex").unwrap(),
            vec![
                OrderItem {
                    id: "a".into(),
                    correct_position: 0,
                },
                OrderItem {
                    id: "b".into(),
                    correct_position: 1,
                },
                OrderItem {
                    id: "c".into(),
                    correct_position: 2,
                },
            ],
        )
    }

    #[test]
    fn test_multiple_choice_accepts_index_or_string() {
        let q = mc_question();
        assert!(is_correct(&q, &AnswerValue::Choice(0)));
        assert!(is_correct(&q, &AnswerValue::Text(" 0 ".into())));
        assert!(!is_correct(&q, &AnswerValue::Choice(2)));
        assert!(!is_correct(&q, &AnswerValue::Text("first".into())));
    }

    #[test]
    fn test_fill_blank_is_trimmed_and_case_insensitive() {
        let q = fill_blank_question();
        assert!(is_correct(&q, &AnswerValue::Sequence(vec!["defi ".into()])));
        assert!(is_correct(&q, &AnswerValue::Sequence(vec!["DEFI".into()])));
        assert!(!is_correct(&q, &AnswerValue::Sequence(vec!["fi".into()])));
    }

    #[test]
    fn test_fill_blank_length_mismatch_is_incorrect() {
        let q = fill_blank_question();
        assert!(!is_correct(&q, &AnswerValue::Sequence(vec![])));
        assert!(!is_correct(
            &q,
            &AnswerValue::Sequence(vec!["DeFi".into(), "extra".into()])
        ));
    }

    #[test]
    fn test_listening_matches_transcript() {
        let q = listening_question();
        assert!(is_correct(&q, &AnswerValue::Text(" Gas ".into())));
        assert!(!is_correct(&q, &AnswerValue::Text("gwei".into())));
    }

    #[test]
    fn test_drag_order_requires_exact_permutation() {
        let q = drag_order_question();
        assert!(is_correct(
            &q,
            &AnswerValue::Sequence(vec!["a".into(), "b".into(), "c".into()])
        ));
        // An adjacent swap earns nothing.
        assert!(!is_correct(
            &q,
            &AnswerValue::Sequence(vec!["a".into(), "c".into(), "b".into()])
        ));
        assert!(!is_correct(
            &q,
            &AnswerValue::Sequence(vec!["a".into(), "b".into()])
        ));
    }

    #[test]
    fn test_malformed_position_table_is_incorrect_not_a_panic() {
        let glossary = Glossary::builtin();
        let q = Question::drag_order(
            "do2",
            "Order the items",
            glossary.word("dex").unwrap(),
            vec![
                OrderItem {
                    id: "a".into(),
                    correct_position: 0,
                },
                OrderItem {
                    id: "b".into(),
                    correct_position: 0,
                },
            ],
        );
        assert!(!is_correct(
            &q,
            &AnswerValue::Sequence(vec!["a".into(), "b".into()])
        ));
    }

    #[test]
    fn test_empty_submission_is_incorrect_for_every_variant() {
        for q in [
            mc_question(),
            fill_blank_question(),
            listening_question(),
            drag_order_question(),
        ] {
            assert!(!is_correct(&q, &AnswerValue::Empty));
        }
    }

    #[test]
    fn test_wrong_shape_is_incorrect_for_every_variant() {
        let q = mc_question();
        assert!(!is_correct(&q, &AnswerValue::Sequence(vec!["0".into()])));
        let q = fill_blank_question();
        assert!(!is_correct(&q, &AnswerValue::Text("DeFi".into())));
        let q = listening_question();
        assert!(!is_correct(&q, &AnswerValue::Choice(0)));
        let q = drag_order_question();
        assert!(!is_correct(&q, &AnswerValue::Text("abc".into())));
    }
}
