//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches the API routes, the guarded portal page routes,
//! and the static materials bucket under a single Axum router. Page routes
//! are wrapped per role group by the guard middleware; API routes carry
//! their own auth extractor.

pub mod auth;
pub mod guard;
pub mod live;
pub mod materials;
pub mod pages;
pub mod profiles;
pub mod videos;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::{get, patch, post};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::profile::Role;
use crate::state::AppState;

/// Structured error body: `{"error": message}` with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/profiles", get(profiles::list_profiles))
        .route("/api/profiles/students", get(profiles::list_students))
        .route("/api/profiles/me", patch(profiles::update_me))
        .route(
            "/api/live-sessions",
            get(live::list_live_sessions).post(live::create_live_session),
        )
        .route("/api/live-sessions/mine", get(live::my_live_sessions))
        .route(
            "/api/materials",
            get(materials::list_materials).post(materials::upload_material),
        )
        .route("/api/videos", get(videos::list_videos))
        .route("/healthz", get(healthz))
}

fn guarded(routes: Router<AppState>, state: &AppState, required: Role) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(
        (state.clone(), Some(required)),
        guard::require_role,
    ))
}

fn page_routes(state: &AppState) -> Router<AppState> {
    let student = guarded(
        Router::new()
            .route("/student/dashboard", get(pages::student_dashboard))
            .route("/student/meetings", get(pages::student_meetings))
            .route("/student/courses", get(pages::student_courses))
            .route("/student/courses/study-materials", get(pages::study_materials)),
        state,
        Role::Student,
    );

    let teacher = guarded(
        Router::new().route("/teacher/dashboard", get(pages::teacher_dashboard)),
        state,
        Role::Teacher,
    );

    let admin = guarded(
        Router::new().route("/admin/dashboard", get(pages::admin_dashboard)),
        state,
        Role::Admin,
    );

    student.merge(teacher).merge(admin)
}

/// Full application router: API + guarded pages + materials bucket.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let materials_bucket = ServeDir::new(state.storage.bucket_dir());

    Router::new()
        .route("/", get(redirect_root_to_login))
        .route("/login", get(login_view))
        .merge(api_routes())
        .merge(page_routes(&state))
        .nest_service("/storage/course-materials", materials_bucket)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn redirect_root_to_login() -> Redirect {
    Redirect::temporary("/login")
}

#[derive(Deserialize)]
struct LoginQuery {
    notice: Option<String>,
}

/// `GET /login` — the public login view stub. Echoes the guard's notice
/// so the client can surface it.
async fn login_view(Query(query): Query<LoginQuery>) -> Json<serde_json::Value> {
    let notice = query
        .notice
        .as_deref()
        .and_then(guard::Notice::from_query)
        .map(guard::Notice::message);
    Json(serde_json::json!({ "view": "login", "notice": notice }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
