use crate::{data::student::StudentId, maud_conveniences::{DIALOG_ID, dismiss_button}};
use maud::{Markup, Render, html};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    const fn icon(self) -> &'static str {
        match self {
            Self::Error => "✖",
            Self::Warning => "!",
            Self::Success => "✔",
        }
    }

    const fn colour(self) -> &'static str {
        match self {
            Self::Error => "text-red-500",
            Self::Warning => "text-yellow-400",
            Self::Success => "text-green-500",
        }
    }
}

/// A modal message with a single button to get rid of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            title: "Error",
            text: text.into(),
            severity: Severity::Error,
        }
    }

    pub fn validation(text: impl Into<String>) -> Self {
        Self {
            title: "Validation Error",
            text: text.into(),
            severity: Severity::Warning,
        }
    }

    pub fn success(title: &'static str, text: impl Into<String>) -> Self {
        Self {
            title,
            text: text.into(),
            severity: Severity::Success,
        }
    }
}

fn modal(severity: Severity, title: &str, text: &str, buttons: Markup) -> Markup {
    html! {
        div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50" {
            div role="alertdialog" class="bg-gray-800 rounded shadow-md p-6 max-w-sm w-full text-center" {
                div class={"text-4xl mb-2 " (severity.colour())} {(severity.icon())}
                h2 class="text-xl font-semibold mb-2" {(title)}
                p class="mb-4 text-gray-300" {(text)}
                (buttons)
            }
        }
    }
}

impl Render for Notification {
    fn render(&self) -> Markup {
        modal(self.severity, self.title, &self.text, dismiss_button("OK"))
    }
}

/// Asks before deleting a record. Confirming sends the delete, cancelling just closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub text: &'static str,
    pub severity: Severity,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
    pub id: StudentId,
}

impl Confirmation {
    pub const fn delete_student(id: StudentId) -> Self {
        Self {
            title: "Delete Student?",
            text: "This action cannot be undone!",
            severity: Severity::Warning,
            confirm_label: "Yes, delete",
            cancel_label: "Cancel",
            id,
        }
    }
}

impl Render for Confirmation {
    fn render(&self) -> Markup {
        let buttons = html! {
            div class="flex flex-row justify-center space-x-4" {
                button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-delete="/students" hx-vals=(json!({"id": self.id}).to_string()) hx-include="#filters" hx-target={"#" (DIALOG_ID)} hx-swap="outerHTML" {
                    (self.confirm_label)
                }
                (dismiss_button(self.cancel_label))
            }
        };

        modal(self.severity, self.title, self.text, buttons)
    }
}
