use crate::{
    data::student::StudentForm,
    maud_conveniences::{empty_dialog_slot, title},
    routes::students::{render_filters, render_student_form, render_student_list_placeholder},
    state::RosterState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-2xl w-full flex flex-col space-y-6" {
            (title("Students"))
            (render_student_form(&StudentForm::default()))
            (render_filters())
            (render_student_list_placeholder())
        }
        (empty_dialog_slot())
    })
}
