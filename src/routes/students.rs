use crate::{
    data::{
        IdForm,
        student::{NewStudentForm, Student},
    },
    error::{MissingFieldSnafu, RosterResult},
    maud_conveniences::{
        error_box, escape, form_submit_button, simple_form_element, subtitle, table, title,
    },
    state::RosterState,
};
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

pub async fn internal_get_student_form() -> Markup {
    html! {
        div id="student_form_error" {}
        (title("Add New Student"))
        (subtitle("Fill in the student information below"))
        // Disabling the submit button for the duration of the request
        // is what stops a second create going out mid-flight. A failed
        // submission lands in the slot above, so the fields (and the
        // draft typed into them) survive for a retry.
        form hx-put="/students" hx-trigger="submit" hx-target="#student_form" hx-target-error="#student_form_error" hx-disabled-elt="find button[type='submit']" class="p-4" {
            (simple_form_element("nom", "Last Name", true, None, Some("Enter last name")))
            (simple_form_element("prenom", "First Name", true, None, Some("Enter first name")))
            (simple_form_element("date_naissance", "Date of Birth", true, Some("date"), None))
            (form_submit_button(Some("Add Student")))
        }
    }
}

pub async fn put_new_student(
    State(state): State<RosterState>,
    Form(form): Form<NewStudentForm>,
) -> RosterResult<Markup> {
    snafu::ensure!(!form.nom.is_empty(), MissingFieldSnafu { name: "nom" });
    snafu::ensure!(!form.prenom.is_empty(), MissingFieldSnafu { name: "prenom" });
    snafu::ensure!(
        !form.date_naissance.is_empty(),
        MissingFieldSnafu {
            name: "date_naissance"
        }
    );

    let created = state.api().create_student(form).await?;
    info!(id = ?created.id, "Student created");
    state.students_changed();

    // A fresh form partial resets the draft to empty fields.
    Ok(internal_get_student_form().await)
}

pub async fn internal_get_students(State(state): State<RosterState>) -> RosterResult<Markup> {
    let students = state.api().all_students().await?;

    if students.is_empty() {
        return Ok(html! {
            div id="all_students_error" {}
            (title("Students List"))
            p class="text-center text-gray-400 py-8" {"No students found"}
        });
    }

    let rows = students.iter().map(student_to_row).collect();
    Ok(html! {
        div id="all_students_error" {}
        (table(
            html! {
                (title("Students List"))
                (subtitle(html! {"Total: " (students.len()) " students"}))
            },
            ["ID", "Last Name", "First Name", "Date of Birth", "Action"],
            rows,
        ))
    })
}

fn student_to_row(student: &Student) -> [Markup; 5] {
    [
        html! {
            @if let Some(id) = student.id {
                (id)
            } @else {
                p class="italic" {"-"}
            }
        },
        escape(&student.nom),
        escape(&student.prenom),
        student.date_of_birth(),
        html! {
            // No delete without an id; rows for unsaved records get no
            // button. A rejected delete is routed into the listing's
            // error slot; only a success touches the row itself.
            @if let Some(id) = student.id {
                button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete="/students" hx-vals={"{\"id\": \"" (id) "\"}" } hx-target="closest tr" hx-target-error="#all_students_error" hx-swap="outerHTML" hx-disabled-elt="this" {
                    "Delete"
                }
            }
        },
    ]
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
) -> Response {
    match state.api().delete_student(id).await {
        Ok(()) => {
            info!(id, "Student deleted");

            // Empty markup replaces the row: the deleted student
            // disappears locally without refetching the rest of the list.
            html! {}.into_response()
        }
        Err(error) => {
            error!(?error, id, "Delete rejected, student stays listed");

            // The button's outerHTML swap applies to the error slot
            // once retargeted, so the response re-creates the slot it
            // replaces and leaves the row alone.
            (
                error.status_code(),
                html! {
                    div id="all_students_error" {
                        (error_box(error.to_string()))
                    }
                },
            )
                .into_response()
        }
    }
}
