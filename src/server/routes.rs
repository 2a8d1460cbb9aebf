use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
    http::StatusCode,
};
use crate::outcome::Outcome;
use crate::query::{self, RosterStats};
use crate::roster::{ADDED, DELETED, UPDATED};
use crate::server::AppState;
use crate::student::{StudentPatch, StudentRecord};
use crate::Error;
use std::sync::Arc;

type Reply = (StatusCode, Json<Outcome>);

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::DuplicateKey(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reply<T>(result: crate::Result<T>, success_message: &str) -> Reply {
    match result {
        Ok(_) => (StatusCode::OK, Json(Outcome::ok(success_message))),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Storage failure: {}", e);
            }
            (status, Json(Outcome::fail(e.to_string())))
        }
    }
}

/// Malformed bodies get the same `{success, message}` shape as every other failure
fn bad_body(rejection: JsonRejection) -> Reply {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, Json(Outcome::fail(rejection.body_text())))
}

pub async fn list_students(State(state): State<Arc<AppState>>) -> Json<Vec<StudentRecord>> {
    let students = state.store.lock().await.load();
    Json(students)
}

pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(roll): Path<String>,
) -> Result<Json<StudentRecord>, Reply> {
    let found = state.store.lock().await.find(&roll);
    found.map(Json).ok_or_else(|| {
        let missing = Error::NotFound(roll);
        (status_for(&missing), Json(Outcome::fail(missing.to_string())))
    })
}

pub async fn add_student(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StudentRecord>, JsonRejection>,
) -> Reply {
    let Json(student) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    tracing::debug!("Adding student {}", student.roll);
    let result = state.store.lock().await.add(student);
    reply(result, ADDED)
}

pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(roll): Path<String>,
    body: Result<Json<StudentPatch>, JsonRejection>,
) -> Reply {
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    let result = state.store.lock().await.update(&roll, &patch);
    reply(result, UPDATED)
}

pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(roll): Path<String>,
) -> Reply {
    let result = state.store.lock().await.remove(&roll);
    reply(result, DELETED)
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RosterStats> {
    let students = state.store.lock().await.load();
    Json(query::stats(&students))
}
