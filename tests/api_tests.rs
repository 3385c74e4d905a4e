use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use moviematch_api::error::{AppError, AppResult};
use moviematch_api::models::{
    CandidateMovie, DiscoverFilter, MovieDetail, Question, QuestionCategory, QuestionOption,
    QuestionType,
};
use moviematch_api::routes::{create_router, AppState};
use moviematch_api::services::providers::MovieCatalog;

/// Catalog double returning scripted results: the filtered discover pass
/// answers from `filtered`, the constraint-free pass from `broadened`
struct StubCatalog {
    filtered: Vec<CandidateMovie>,
    broadened: Vec<CandidateMovie>,
}

#[async_trait::async_trait]
impl MovieCatalog for StubCatalog {
    async fn discover_movies(&self, filter: &DiscoverFilter) -> AppResult<Vec<CandidateMovie>> {
        if filter.vote_average_gte.is_some() {
            Ok(self.filtered.clone())
        } else {
            Ok(self.broadened.clone())
        }
    }

    async fn movie_detail(&self, movie_id: u64) -> AppResult<MovieDetail> {
        if movie_id == 27205 {
            Ok(MovieDetail {
                id: 27205,
                title: "Inception".to_string(),
                overview: "A thief who steals corporate secrets".to_string(),
                poster_path: Some("/inception.jpg".to_string()),
                backdrop_path: None,
                release_date: Some("2010-07-15".to_string()),
                runtime: Some(148),
                vote_average: 8.4,
                vote_count: 36000,
                genres: vec![],
                tagline: None,
            })
        } else {
            Err(AppError::NotFound(format!("Movie {} not found", movie_id)))
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn option(value: &str, genre_id: Option<u32>, provider_id: Option<u32>) -> QuestionOption {
    QuestionOption {
        value: value.to_string(),
        label: value.to_string(),
        emoji: None,
        tmdb_genre_id: genre_id,
        provider_id,
    }
}

/// Question catalog matching the seeded migration
fn seeded_questions() -> Vec<Question> {
    let build = |id: i32,
                 category: QuestionCategory,
                 question_type: QuestionType,
                 options: Vec<QuestionOption>| Question {
        id,
        text: format!("{} question", category.as_str()),
        question_type,
        category,
        options,
        display_order: id,
    };

    vec![
        build(
            1,
            QuestionCategory::Genre,
            QuestionType::MultiChoice,
            vec![
                option("action", Some(28), None),
                option("comedy", Some(35), None),
                option("horror", Some(27), None),
            ],
        ),
        build(
            2,
            QuestionCategory::Mood,
            QuestionType::MultiChoice,
            vec![option("thrilling", None, None), option("funny", None, None)],
        ),
        build(
            3,
            QuestionCategory::Era,
            QuestionType::MultiChoice,
            vec![
                option("90s", None, None),
                option("2010s", None, None),
                option("any", None, None),
            ],
        ),
        build(
            4,
            QuestionCategory::Length,
            QuestionType::SingleChoice,
            vec![
                option("short", None, None),
                option("medium", None, None),
                option("any", None, None),
            ],
        ),
        build(
            5,
            QuestionCategory::Rating,
            QuestionType::SingleChoice,
            vec![option("0", None, None), option("7", None, None)],
        ),
        build(
            6,
            QuestionCategory::Platform,
            QuestionType::MultiChoice,
            vec![
                option("netflix", None, Some(8)),
                option("any", None, None),
            ],
        ),
    ]
}

fn movie(id: u64, genre_ids: Vec<u32>, vote_average: f64) -> CandidateMovie {
    CandidateMovie {
        id,
        title: format!("Movie {id}"),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: Some("2018-03-09".to_string()),
        vote_average,
        vote_count: 2500,
        popularity: 60.0,
        genre_ids,
        original_language: None,
        runtime: None,
    }
}

fn create_test_server(catalog: StubCatalog) -> TestServer {
    let state = Arc::new(AppState {
        questions: seeded_questions(),
        catalog: Arc::new(catalog),
        watch_region: "US".to_string(),
    });
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn default_catalog() -> StubCatalog {
    StubCatalog {
        filtered: vec![
            movie(101, vec![28, 53], 7.8),
            movie(102, vec![35], 6.9),
            movie(103, vec![28], 7.1),
            movie(104, vec![27], 6.2),
        ],
        broadened: vec![],
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(default_catalog());
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let server = create_test_server(default_catalog());
    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_questions_catalog_is_served_in_order() {
    let server = create_test_server(default_catalog());

    let response = server.get("/api/v1/questions").await;
    response.assert_status_ok();

    let questions: Vec<Value> = response.json();
    assert_eq!(questions.len(), 6);
    assert_eq!(questions[0]["category"], "genre");
    assert_eq!(questions[5]["category"], "platform");
    assert_eq!(questions[0]["options"][0]["value"], "action");
    assert_eq!(questions[0]["options"][0]["tmdb_genre_id"], 28);
}

#[tokio::test]
async fn test_match_round_trip_ranks_candidates() {
    let server = create_test_server(default_catalog());

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "user1_answers": [
                {"question_id": 1, "answer": ["action"]},
                {"question_id": 2, "answer": ["thrilling"]}
            ],
            "user2_answers": [
                {"question_id": 1, "answer": ["action", "comedy"]},
                {"question_id": 5, "answer": 7}
            ],
            "seen_movie_ids": []
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 4);
    assert_eq!(body["movie_count"].as_u64().unwrap(), 4);

    // Best-first ordering with ranks counting up from 1
    let mut previous = 1.0_f64;
    for (index, entry) in movies.iter().enumerate() {
        let score = entry["match_score"].as_f64().unwrap();
        assert!(score >= 0.55 && score <= 0.98, "score out of band: {score}");
        assert!(score <= previous);
        assert_eq!(entry["rank"].as_u64().unwrap(), index as u64 + 1);
        previous = score;
    }

    // Scored movies keep the flattened candidate fields
    assert!(movies[0]["id"].as_u64().is_some());
    assert!(movies[0]["title"].as_str().is_some());

    // The pure action pick both users share ranks first, pure horror last
    let first_id = movies[0]["id"].as_u64().unwrap();
    let last_id = movies[3]["id"].as_u64().unwrap();
    assert_eq!(first_id, 103);
    assert_eq!(last_id, 104);
}

#[tokio::test]
async fn test_match_excludes_seen_movies() {
    let server = create_test_server(default_catalog());

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "user1_answers": [{"question_id": 1, "answer": ["action"]}],
            "user2_answers": [{"question_id": 1, "answer": ["action"]}],
            "seen_movie_ids": [101]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let ids: Vec<u64> = body["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();
    assert!(!ids.contains(&101));
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_match_broadens_a_thin_pool() {
    let server = create_test_server(StubCatalog {
        filtered: vec![movie(101, vec![28], 7.5)],
        broadened: vec![
            movie(101, vec![28], 7.5),
            movie(201, vec![35], 6.5),
            movie(202, vec![18], 6.8),
        ],
    });

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "user1_answers": [{"question_id": 1, "answer": ["action"]}],
            "user2_answers": [{"question_id": 1, "answer": ["action"]}],
            "seen_movie_ids": []
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let ids: Vec<u64> = body["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();

    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&101) && ids.contains(&201) && ids.contains(&202));
    assert_eq!(ids.iter().filter(|id| **id == 101).count(), 1);
}

#[tokio::test]
async fn test_match_with_nothing_left_returns_empty_list() {
    let server = create_test_server(StubCatalog {
        filtered: vec![],
        broadened: vec![],
    });

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "user1_answers": [],
            "user2_answers": [],
            "seen_movie_ids": []
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movies"].as_array().unwrap().len(), 0);
    assert_eq!(body["movie_count"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_match_body_is_rejected() {
    let server = create_test_server(default_catalog());

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "user1_answers": [{"question_id": 1, "answer": ["action"]}]
        }))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_movie_detail_round_trip() {
    let server = create_test_server(default_catalog());

    let response = server.get("/api/v1/movies/27205").await;
    response.assert_status_ok();

    let detail: Value = response.json();
    assert_eq!(detail["title"], "Inception");
    assert_eq!(detail["runtime"], 148);
}

#[tokio::test]
async fn test_movie_detail_unknown_id_is_404() {
    let server = create_test_server(default_catalog());

    let response = server.get("/api/v1/movies/99999999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_movie_detail_rejects_id_zero() {
    let server = create_test_server(default_catalog());

    let response = server.get("/api/v1/movies/0").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}
