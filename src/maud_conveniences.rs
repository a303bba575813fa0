use maud::{Markup, Render, html};

pub const DIALOG_ID: &str = "dialog";

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    ty: Option<&'static str>,
    value: &str,
) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            input type=(ty.unwrap_or("text")) id=(id) name=(id) value=(value) class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        }
    }
}

pub fn form_submit_button(text: &'static str) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text)
            }
        }
    }
}

/// The single slot every popup lands in.
pub fn dialog_slot(content: &impl Render, out_of_band: bool) -> Markup {
    html! {
        div id=(DIALOG_ID) hx-swap-oob=[out_of_band.then_some("true")] {
            (content)
        }
    }
}

pub fn empty_dialog_slot() -> Markup {
    html! {
        div id=(DIALOG_ID) {}
    }
}

pub fn dismiss_button(text: &'static str) -> Markup {
    html! {
        button class="bg-gray-600 hover:bg-gray-800 font-bold py-2 px-4 rounded" hx-get="/internal/dismiss" hx-target={"#" (DIALOG_ID)} hx-swap="outerHTML" {
            (text)
        }
    }
}
