#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    routes::{
        index::get_index_route,
        sse::sse_feed,
        statistics::internal_get_statistics,
        students::{
            delete_student, internal_get_student_form, internal_get_students, put_new_student,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

#[macro_use]
extern crate tracing;

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod maud_conveniences;
pub mod routes;
pub mod state;

#[must_use]
pub fn app(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", put(put_new_student).delete(delete_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/students/form", get(internal_get_student_form))
        .route("/internal/statistics", get(internal_get_statistics))
        .route("/sse_feed", get(sse_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
