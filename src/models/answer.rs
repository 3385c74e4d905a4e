use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::question::{Question, QuestionCategory};

/// A single answered value: a selection key, a slider number, or a toggle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerScalar {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl AnswerScalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric view of the scalar. Numeric strings parse through so that
    /// clients sending slider values as text still resolve.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
            Self::Flag(_) => None,
        }
    }
}

/// An answer to one question: either one scalar or a multi-selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(AnswerScalar),
    Many(Vec<AnswerScalar>),
}

impl AnswerValue {
    pub fn scalars(&self) -> &[AnswerScalar] {
        match self {
            Self::Single(scalar) => std::slice::from_ref(scalar),
            Self::Many(scalars) => scalars.as_slice(),
        }
    }

    /// An empty multi-selection carries no preference
    pub fn is_empty(&self) -> bool {
        self.scalars().is_empty()
    }

    /// Selection keys held by this answer, in submission order
    pub fn text_values(&self) -> Vec<String> {
        self.scalars()
            .iter()
            .filter_map(|scalar| scalar.as_text().map(str::to_string))
            .collect()
    }

    /// Numeric values held by this answer, in submission order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.scalars()
            .iter()
            .filter_map(AnswerScalar::as_number)
            .collect()
    }
}

/// One submitted answer, tied to a catalog question by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAnswer {
    pub question_id: i32,
    pub answer: AnswerValue,
}

/// All answers from one user, indexed by question id.
///
/// Duplicate submissions for the same question keep the first occurrence.
/// Answers referencing questions absent from the catalog are retained here
/// but never surface through [`AnswerSet::for_category`], which walks the
/// catalog rather than the submission.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    by_question: HashMap<i32, AnswerValue>,
}

impl AnswerSet {
    pub fn from_answers(answers: Vec<UserAnswer>) -> Self {
        let mut by_question = HashMap::with_capacity(answers.len());
        for submitted in answers {
            by_question
                .entry(submitted.question_id)
                .or_insert(submitted.answer);
        }
        Self { by_question }
    }

    pub fn get(&self, question_id: i32) -> Option<&AnswerValue> {
        self.by_question.get(&question_id)
    }

    pub fn is_empty(&self) -> bool {
        self.by_question.is_empty()
    }

    /// Finds the answered question for a category.
    ///
    /// The catalog is scanned in its own order and the first question of the
    /// category with a non-empty answer wins, so lookup is deterministic even
    /// if a category ever holds several questions.
    pub fn for_category<'a>(
        &'a self,
        catalog: &'a [Question],
        category: QuestionCategory,
    ) -> Option<(&'a Question, &'a AnswerValue)> {
        catalog
            .iter()
            .filter(|question| question.category == category)
            .find_map(|question| {
                self.by_question
                    .get(&question.id)
                    .filter(|value| !value.is_empty())
                    .map(|value| (question, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn question(id: i32, category: QuestionCategory) -> Question {
        Question {
            id,
            text: format!("question {id}"),
            question_type: QuestionType::MultiChoice,
            category,
            options: vec![],
            display_order: id,
        }
    }

    fn text_answer(question_id: i32, values: &[&str]) -> UserAnswer {
        UserAnswer {
            question_id,
            answer: AnswerValue::Many(
                values
                    .iter()
                    .map(|v| AnswerScalar::Text(v.to_string()))
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_untagged_value_shapes() {
        let single: AnswerValue = serde_json::from_str("\"thrilling\"").unwrap();
        assert_eq!(single.text_values(), vec!["thrilling".to_string()]);

        let many: AnswerValue = serde_json::from_str("[\"action\",\"comedy\"]").unwrap();
        assert_eq!(
            many.text_values(),
            vec!["action".to_string(), "comedy".to_string()]
        );

        let number: AnswerValue = serde_json::from_str("7").unwrap();
        assert_eq!(number.numeric_values(), vec![7.0]);

        let flag: AnswerValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, AnswerValue::Single(AnswerScalar::Flag(true)));
        assert!(flag.text_values().is_empty());
        assert!(flag.numeric_values().is_empty());
    }

    #[test]
    fn test_numeric_strings_parse_as_numbers() {
        let value = AnswerValue::Single(AnswerScalar::Text("6.5".to_string()));
        assert_eq!(value.numeric_values(), vec![6.5]);
    }

    #[test]
    fn test_user_answer_wire_shape() {
        let parsed: UserAnswer =
            serde_json::from_str(r#"{"question_id": 1, "answer": ["action"]}"#).unwrap();
        assert_eq!(parsed.question_id, 1);
        assert_eq!(parsed.answer.text_values(), vec!["action".to_string()]);

        let scalar: UserAnswer =
            serde_json::from_str(r#"{"question_id": 5, "answer": 7}"#).unwrap();
        assert_eq!(scalar.answer.numeric_values(), vec![7.0]);
    }

    #[test]
    fn test_duplicate_answers_keep_first() {
        let set = AnswerSet::from_answers(vec![
            text_answer(1, &["action"]),
            text_answer(1, &["horror"]),
        ]);
        assert_eq!(
            set.get(1).unwrap().text_values(),
            vec!["action".to_string()]
        );
    }

    #[test]
    fn test_for_category_follows_catalog_order() {
        let catalog = vec![
            question(2, QuestionCategory::Genre),
            question(1, QuestionCategory::Genre),
        ];
        let set = AnswerSet::from_answers(vec![
            text_answer(1, &["comedy"]),
            text_answer(2, &["action"]),
        ]);

        let (matched, value) = set
            .for_category(&catalog, QuestionCategory::Genre)
            .unwrap();
        assert_eq!(matched.id, 2);
        assert_eq!(value.text_values(), vec!["action".to_string()]);
    }

    #[test]
    fn test_for_category_skips_empty_selections() {
        let catalog = vec![question(1, QuestionCategory::Mood)];
        let set = AnswerSet::from_answers(vec![UserAnswer {
            question_id: 1,
            answer: AnswerValue::Many(vec![]),
        }]);
        assert!(set.for_category(&catalog, QuestionCategory::Mood).is_none());
    }

    #[test]
    fn test_for_category_ignores_uncataloged_answers() {
        let catalog = vec![question(1, QuestionCategory::Era)];
        let set = AnswerSet::from_answers(vec![text_answer(99, &["recent"])]);
        assert!(set.for_category(&catalog, QuestionCategory::Era).is_none());
    }
}
