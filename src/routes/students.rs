use crate::{
    client::{DeleteOutcome, Listing},
    data::{
        IdForm,
        student::{Student, StudentForm},
    },
    error::{RosterResult, SerialiseValsSnafu},
    filter::{FilterCriteria, FilterQuery},
    maud_conveniences::{DIALOG_ID, dialog_slot, empty_dialog_slot, form_submit_button, simple_form_element, title},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::json;
use snafu::ResultExt;

pub const STUDENT_FORM_ID: &str = "student_form";
pub const STUDENT_LIST_ID: &str = "student_list";
pub const FILTERS_ID: &str = "filters";

pub fn render_student_form(form: &StudentForm) -> Markup {
    html! {
        form id=(STUDENT_FORM_ID) hx-post="/students" hx-include={"#" (FILTERS_ID)} hx-target="this" hx-swap="outerHTML" class="p-4" {
            @if form.is_editing() {
                (title("Edit Student"))
            } @else {
                (title("Add New Student"))
            }
            input type="hidden" id="id" name="id" value=(form.id) {}
            (simple_form_element("name", "Name", None, &form.name))
            (simple_form_element("email", "Email", Some("email"), &form.email))
            (simple_form_element("course", "Course", None, &form.course))
            (simple_form_element("age", "Age", Some("number"), &form.age))
            @if form.is_editing() {
                (form_submit_button("Update Student"))
            } @else {
                (form_submit_button("Add Student"))
            }
        }
    }
}

/// Typing in any of these reloads the list straight away.
pub fn render_filters() -> Markup {
    html! {
        div id=(FILTERS_ID) hx-get="/internal/students" hx-trigger="input" hx-include={"#" (FILTERS_ID)} hx-target={"#" (STUDENT_LIST_ID)} hx-swap="outerHTML" class="flex flex-row space-x-4" {
            input type="text" name="search" placeholder="Search name or course" class="shadow border rounded w-full py-2 px-3 bg-gray-700 border-gray-600" {}
            input type="text" name="course_filter" placeholder="Course" class="shadow border rounded w-full py-2 px-3 bg-gray-700 border-gray-600" {}
            input type="number" name="age_filter" placeholder="Max age" class="shadow border rounded w-full py-2 px-3 bg-gray-700 border-gray-600" {}
        }
    }
}

/// Where the list will go - it fetches itself as soon as the page loads.
pub fn render_student_list_placeholder() -> Markup {
    html! {
        div id=(STUDENT_LIST_ID) hx-get="/internal/students" hx-trigger="load" hx-include={"#" (FILTERS_ID)} hx-swap="outerHTML" {}
    }
}

pub fn render_student_list(students: &[Student], out_of_band: bool) -> RosterResult<Markup> {
    let rows = students
        .iter()
        .map(|student| {
            serde_json::to_string(student)
                .context(SerialiseValsSnafu { what: "student" })
                .map(|edit_vals| (student, edit_vals, json!({"id": student.id}).to_string()))
        })
        .collect::<RosterResult<Vec<_>>>()?;

    Ok(html! {
        ul id=(STUDENT_LIST_ID) hx-swap-oob=[out_of_band.then_some("true")] class="flex flex-col space-y-4" {
            @for (student, edit_vals, delete_vals) in rows {
                li class="bg-gray-800 shadow-md p-4 rounded-md flex justify-between items-center" {
                    div {
                        p class="font-bold text-lg" {(student.name)}
                        p {"Email: " (student.email)}
                        p {"Course: " (student.course) " | Age: " (student.age)}
                    }
                    div class="space-x-2" {
                        button class="bg-yellow-500 text-white px-3 py-1 rounded" hx-get="/internal/students/edit" hx-vals=(edit_vals) hx-target={"#" (STUDENT_FORM_ID)} hx-swap="outerHTML show:window:top" {
                            "Edit"
                        }
                        button class="bg-red-600 text-white px-3 py-1 rounded" hx-get="/internal/students/confirm_delete" hx-vals=(delete_vals) hx-target={"#" (DIALOG_ID)} hx-swap="outerHTML" {
                            "Delete"
                        }
                    }
                }
            }
        }
    })
}

fn render_listing(listing: &Listing, out_of_band: bool) -> RosterResult<Markup> {
    let list = render_student_list(&listing.students, out_of_band)?;
    Ok(html! {
        (list)
        @if let Some(notification) = &listing.notification {
            (dialog_slot(notification, true))
        }
    })
}

pub async fn internal_get_students(
    State(state): State<RosterState>,
    Query(filters): Query<FilterQuery>,
) -> RosterResult<Markup> {
    let listing = state.client().load(&FilterCriteria::from(&filters)).await;
    render_listing(&listing, false)
}

#[derive(Deserialize, Debug)]
pub struct SubmitStudentForm {
    #[serde(flatten)]
    student: StudentForm,
    #[serde(flatten)]
    filters: FilterQuery,
}

pub async fn post_student(
    State(state): State<RosterState>,
    Form(SubmitStudentForm { student, filters }): Form<SubmitStudentForm>,
) -> RosterResult<Markup> {
    let outcome = state.client().submit(&student).await;
    let notification = outcome.notification();

    if !outcome.is_saved() {
        return Ok(html! {
            (render_student_form(&student))
            (dialog_slot(&notification, true))
        });
    }

    let listing = state.client().load(&FilterCriteria::from(&filters)).await;
    let list = render_student_list(&listing.students, true)?;
    //a failed reload is the last thing that happened, so it is what gets shown
    let notification = listing.notification.unwrap_or(notification);

    Ok(html! {
        (render_student_form(&StudentForm::default()))
        (list)
        (dialog_slot(&notification, true))
    })
}

pub async fn internal_get_edit_form(
    State(state): State<RosterState>,
    Query(student): Query<Student>,
) -> Markup {
    render_student_form(&state.client().edit(&student))
}

pub async fn internal_get_confirm_delete(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
) -> Markup {
    dialog_slot(&state.client().confirm_delete(id), false)
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
    Query(filters): Query<FilterQuery>,
) -> RosterResult<Markup> {
    let outcome = state.client().delete(id).await;
    let notification = outcome.notification();

    if outcome != DeleteOutcome::Deleted {
        return Ok(dialog_slot(&notification, false));
    }

    let listing = state.client().load(&FilterCriteria::from(&filters)).await;
    let list = render_student_list(&listing.students, true)?;
    let notification = listing.notification.unwrap_or(notification);

    Ok(html! {
        (dialog_slot(&notification, false))
        (list)
    })
}

pub async fn internal_get_dismiss() -> Markup {
    empty_dialog_slot()
}
