use crate::{
    api::StudentApi,
    data::student::{Student, StudentForm, StudentId, ValidationError},
    error::RosterError,
    filter::FilterCriteria,
    notify::{Confirmation, Notification},
};
use std::sync::Arc;

/// What the list should show after a load, plus anything to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub students: Vec<Student>,
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    Rejected { message: Option<String> },
    ServerError,
    Saved { updated: bool },
}

impl SubmitOutcome {
    pub fn notification(&self) -> Notification {
        match self {
            Self::Invalid(err) => Notification::validation(err.message()),
            Self::Rejected { message } => {
                Notification::error(message.as_deref().unwrap_or("Validation failed"))
            }
            Self::ServerError => Notification::error("Server error"),
            Self::Saved { updated: true } => Notification::success("Updated", "Student updated"),
            Self::Saved { updated: false } => Notification::success("Added", "Student added"),
        }
    }

    /// Only a save clears the form - on anything else the user keeps what they typed.
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    NetworkError,
}

impl DeleteOutcome {
    pub fn notification(self) -> Notification {
        match self {
            Self::Deleted => Notification::success("Deleted", "Student has been removed"),
            Self::Failed => Notification::error("Failed to delete"),
            Self::NetworkError => Notification::error("Network error"),
        }
    }
}

/// Everything the page can do to the students collection.
#[derive(Clone, Debug)]
pub struct StudentClient {
    api: Arc<dyn StudentApi>,
}

impl StudentClient {
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self, criteria: &FilterCriteria) -> Listing {
        match self.api.list().await {
            Ok(students) => Listing {
                students: criteria.apply(students),
                notification: None,
            },
            Err(e) => {
                warn!(?e, "Unable to load students");
                Listing {
                    students: vec![],
                    notification: Some(Notification::error("Failed to load students")),
                }
            }
        }
    }

    pub async fn submit(&self, form: &StudentForm) -> SubmitOutcome {
        let submission = match form.validate() {
            Ok(s) => s,
            Err(e) => {
                debug!(?e, "Student form failed validation");
                return SubmitOutcome::Invalid(e);
            }
        };

        let updated = submission.id.is_some();
        let result = match submission.id {
            Some(id) => self.api.update(id, &submission.payload).await,
            None => self.api.create(&submission.payload).await,
        };

        match result {
            Ok(()) => {
                info!(id = ?submission.id, "Saved student");
                SubmitOutcome::Saved { updated }
            }
            Err(RosterError::RejectedRequest { status, message }) => {
                warn!(%status, ?message, "Students API rejected save");
                SubmitOutcome::Rejected { message }
            }
            Err(e) => {
                error!(?e, "Unable to save student");
                SubmitOutcome::ServerError
            }
        }
    }

    #[allow(clippy::unused_self)]
    pub fn edit(&self, student: &Student) -> StudentForm {
        StudentForm::from(student)
    }

    #[allow(clippy::unused_self)]
    pub const fn confirm_delete(&self, id: StudentId) -> Confirmation {
        Confirmation::delete_student(id)
    }

    pub async fn delete(&self, id: StudentId) -> DeleteOutcome {
        match self.api.delete(id).await {
            Ok(()) => {
                info!(%id, "Deleted student");
                DeleteOutcome::Deleted
            }
            Err(e) if e.is_transport() => {
                error!(?e, "Unable to reach students API");
                DeleteOutcome::NetworkError
            }
            Err(e) => {
                warn!(?e, %id, "Unable to delete student");
                DeleteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::fake::{ApiCall, RecordingApi, Reply},
        data::student::StudentPayload,
        filter::FilterQuery,
        notify::Severity,
    };
    use reqwest::StatusCode;

    fn ann() -> Student {
        Student {
            id: StudentId(1),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            course: "Math".into(),
            age: 20,
        }
    }

    fn client_for(api: RecordingApi) -> (StudentClient, Arc<RecordingApi>) {
        let api = Arc::new(api);
        (StudentClient::new(api.clone()), api)
    }

    fn bo_form(id: &str, age: &str) -> StudentForm {
        StudentForm {
            id: id.into(),
            name: "Bo".into(),
            email: "b@x.com".into(),
            course: "CS".into(),
            age: age.into(),
        }
    }

    fn search(term: &str) -> FilterCriteria {
        FilterCriteria::from(&FilterQuery {
            search: term.into(),
            ..FilterQuery::default()
        })
    }

    #[tokio::test]
    async fn load_filters_what_the_server_sent() {
        let (client, api) = client_for(RecordingApi::new(vec![ann()]));

        let hit = client.load(&search("an")).await;
        assert_eq!(hit.students, vec![ann()]);
        assert_eq!(hit.notification, None);

        let miss = client.load(&search("xyz")).await;
        assert!(miss.students.is_empty());

        assert_eq!(api.calls(), [ApiCall::List, ApiCall::List]);
    }

    #[tokio::test]
    async fn failed_load_leaves_the_list_empty() {
        let (client, _api) =
            client_for(RecordingApi::new(vec![ann()]).with_list_reply(Reply::Unreachable));

        let listing = client.load(&FilterCriteria::default()).await;
        assert!(listing.students.is_empty());
        assert_eq!(
            listing.notification,
            Some(Notification::error("Failed to load students"))
        );
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_api() {
        let (client, api) = client_for(RecordingApi::new(vec![]));

        for age in ["9", "101", "", "ten"] {
            let outcome = client.submit(&bo_form("", age)).await;
            assert!(matches!(outcome, SubmitOutcome::Invalid(_)), "{age}");
            assert_eq!(outcome.notification().severity, Severity::Warning);
        }
        let blank_name = StudentForm {
            name: "   ".into(),
            ..bo_form("", "15")
        };
        assert_eq!(
            client.submit(&blank_name).await,
            SubmitOutcome::Invalid(ValidationError::MissingFields)
        );

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn boundary_ages_are_sent() {
        let (client, api) = client_for(RecordingApi::new(vec![]));

        assert!(client.submit(&bo_form("", "10")).await.is_saved());
        assert!(client.submit(&bo_form("", "100")).await.is_saved());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn create_and_update_pick_the_right_call() {
        let (client, api) = client_for(RecordingApi::new(vec![]));
        let payload = StudentPayload {
            name: "Bo".into(),
            email: "b@x.com".into(),
            course: "CS".into(),
            age: 15,
        };

        let created = client.submit(&bo_form("", "15")).await;
        assert_eq!(created, SubmitOutcome::Saved { updated: false });
        assert_eq!(
            created.notification(),
            Notification::success("Added", "Student added")
        );

        let updated = client.submit(&bo_form("7", "15")).await;
        assert_eq!(updated, SubmitOutcome::Saved { updated: true });
        assert_eq!(updated.notification().title, "Updated");

        assert_eq!(
            api.calls(),
            [
                ApiCall::Create(payload.clone()),
                ApiCall::Update(StudentId(7), payload)
            ]
        );
    }

    #[tokio::test]
    async fn rejected_saves_show_the_server_message_or_a_fallback() {
        let (client, _api) = client_for(RecordingApi::new(vec![]).with_save_reply(Reply::Rejected(
            StatusCode::BAD_REQUEST,
            Some("Email already exists".into()),
        )));
        let outcome = client.submit(&bo_form("", "15")).await;
        assert!(!outcome.is_saved());
        assert_eq!(
            outcome.notification(),
            Notification::error("Email already exists")
        );

        let (client, _api) = client_for(
            RecordingApi::new(vec![])
                .with_save_reply(Reply::Rejected(StatusCode::BAD_REQUEST, None)),
        );
        assert_eq!(
            client.submit(&bo_form("", "15")).await.notification(),
            Notification::error("Validation failed")
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_a_server_error() {
        let (client, _api) =
            client_for(RecordingApi::new(vec![]).with_save_reply(Reply::Unreachable));
        let outcome = client.submit(&bo_form("", "15")).await;
        assert_eq!(outcome, SubmitOutcome::ServerError);
        assert_eq!(outcome.notification(), Notification::error("Server error"));
    }

    #[test]
    fn edit_primes_the_form() {
        let (client, api) = client_for(RecordingApi::new(vec![]));
        assert_eq!(client.edit(&ann()), StudentForm::from(&ann()));
        assert_eq!(client.edit(&ann()), client.edit(&ann()));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_outcomes() {
        let (client, api) = client_for(RecordingApi::new(vec![]));
        assert_eq!(client.delete(StudentId(1)).await, DeleteOutcome::Deleted);
        assert_eq!(api.calls(), [ApiCall::Delete(StudentId(1))]);

        let (client, _api) = client_for(
            RecordingApi::new(vec![])
                .with_delete_reply(Reply::Rejected(StatusCode::NOT_FOUND, None)),
        );
        assert_eq!(client.delete(StudentId(1)).await, DeleteOutcome::Failed);
        assert_eq!(
            DeleteOutcome::Failed.notification(),
            Notification::error("Failed to delete")
        );

        let (client, _api) =
            client_for(RecordingApi::new(vec![]).with_delete_reply(Reply::Unreachable));
        assert_eq!(
            client.delete(StudentId(1)).await,
            DeleteOutcome::NetworkError
        );
    }

    #[test]
    fn asking_to_delete_is_free() {
        let (client, api) = client_for(RecordingApi::new(vec![]));
        let confirmation = client.confirm_delete(StudentId(3));
        assert_eq!(confirmation.id, StudentId(3));
        assert_eq!(confirmation.confirm_label, "Yes, delete");
        assert!(api.calls().is_empty());
    }
}
