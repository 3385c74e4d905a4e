use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{Question, QuestionCategory, QuestionOption, QuestionType};

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i32,
    text: String,
    question_type: String,
    category: String,
    options: Json<Vec<QuestionOption>>,
    display_order: i32,
}

/// Loads the question catalog from the database
///
/// The catalog is immutable at runtime, so this runs once at startup and the
/// result is shared through application state. Rows with an unrecognized
/// category or type are skipped rather than failing the whole load, which
/// lets older deployments survive rows written by newer schema revisions.
pub async fn load_questions(pool: &PgPool) -> AppResult<Vec<Question>> {
    let rows = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, text, question_type, category, options, display_order
        FROM questions
        ORDER BY display_order, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        let category = match QuestionCategory::parse(&row.category) {
            Some(category) => category,
            None => {
                tracing::warn!(
                    question_id = row.id,
                    category = %row.category,
                    "Skipping question with unknown category"
                );
                continue;
            }
        };

        let question_type = match QuestionType::parse(&row.question_type) {
            Some(question_type) => question_type,
            None => {
                tracing::warn!(
                    question_id = row.id,
                    question_type = %row.question_type,
                    "Skipping question with unknown type"
                );
                continue;
            }
        };

        questions.push(Question {
            id: row.id,
            text: row.text,
            question_type,
            category,
            options: row.options.0,
            display_order: row.display_order,
        });
    }

    tracing::info!(count = questions.len(), "Loaded question catalog");

    Ok(questions)
}
