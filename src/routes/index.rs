use crate::state::RosterState;
use axum::extract::State;
use maud::{Markup, html};

/// The whole dashboard. Each section is a lazily loaded partial; the
/// listing and statistics sections also refetch whenever the refresh
/// feed announces a change. A failed fetch lands in the section's
/// error slot, never over the section's current content.
pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        header class="border-b border-gray-700 bg-gray-800 w-full" {
            div class="max-w-7xl mx-auto px-4 py-6" {
                h1 class="text-3xl font-bold" {"Student Management"}
                p class="text-gray-400" {"Manage and track student information"}
            }
        }
        div sse-connect="/sse_feed" class="max-w-7xl mx-auto px-4 py-8 grid grid-cols-1 lg:grid-cols-3 gap-8 w-full" {
            div class="lg:col-span-1" {
                div id="student_form" hx-get="/internal/students/form" hx-trigger="load" hx-target-error="#student_form_error" {
                    div id="student_form_error" {}
                }
            }
            div class="lg:col-span-2 space-y-8" {
                div id="statistics" hx-get="/internal/statistics" hx-trigger="load, sse:students_changed" hx-target-error="#statistics_error" {
                    div id="statistics_error" {}
                }
                div id="all_students" hx-get="/internal/students" hx-trigger="load, sse:students_changed" hx-target-error="#all_students_error" {
                    div id="all_students_error" {}
                }
            }
        }
    })
}
