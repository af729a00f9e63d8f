// src/routes.rs

use axum::{
    Json, Router,
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{answers, participants, permissions, questions, quizzes, roles, sessions, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Registers every resource route.
/// * Applies global middleware (Trace, CORS).
/// * Injects the shared state (database pool).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origins.as_deref());

    let user_routes = Router::new()
        .route("/users/", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/roles", get(users::list_user_roles))
        .route(
            "/users/{id}/roles/{role_id}",
            put(users::assign_role).delete(users::revoke_role),
        );

    let role_routes = Router::new()
        .route("/roles/", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route("/roles/{id}/permissions", get(roles::list_role_permissions))
        .route(
            "/roles/{id}/permissions/{permission_id}",
            put(roles::grant_permission).delete(roles::revoke_permission),
        )
        .route(
            "/permissions/",
            get(permissions::list_permissions).post(permissions::create_permission),
        )
        .route(
            "/permissions/{id}",
            get(permissions::get_permission)
                .put(permissions::update_permission)
                .delete(permissions::delete_permission),
        );

    let quiz_routes = Router::new()
        .route(
            "/quizzes/",
            get(quizzes::list_quizzes).post(quizzes::create_quiz),
        )
        .route(
            "/quizzes/{id}",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .patch(quizzes::patch_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route("/quizzes/{id}/questions", get(quizzes::list_quiz_questions))
        .route("/questions/", post(questions::create_question))
        .route(
            "/questions/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .patch(questions::patch_question)
                .delete(questions::delete_question),
        )
        .route("/questions/{id}/answers", get(questions::list_question_answers))
        .route("/answers/", post(answers::create_answer))
        .route(
            "/answers/{id}",
            put(answers::update_answer).delete(answers::delete_answer),
        );

    // `/sessions/{id}` is looked up by access code on GET and by id on DELETE.
    let session_routes = Router::new()
        .route(
            "/sessions/",
            get(sessions::list_sessions).post(sessions::start_session),
        )
        .route("/sessions/join", post(sessions::join_session))
        .route("/sessions/submit-answer", post(sessions::submit_answer))
        .route(
            "/sessions/{id}",
            get(sessions::get_session_by_code).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/next-question", post(sessions::next_question))
        .route("/sessions/{id}/end", post(sessions::end_session))
        .route(
            "/sessions/{id}/participants",
            get(sessions::list_session_participants),
        )
        .route("/participants/{id}/score", put(participants::update_score))
        .route(
            "/participants/{id}/answers",
            get(participants::list_participant_answers),
        )
        .route(
            "/participants/{id}",
            axum::routing::delete(participants::delete_participant),
        );

    Router::new()
        .route("/", get(root))
        .merge(user_routes)
        .merge(role_routes)
        .merge(quiz_routes)
        .merge(session_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Trivia API" }))
}

/// Any origin when `origins` is `None`; otherwise only the listed ones.
/// Credentials are never allowed, which keeps the wildcard form valid.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        None => AllowOrigin::from(Any),
        Some(list) => {
            let parsed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(parsed)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
