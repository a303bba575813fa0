use crate::{
    config::ApiConfig,
    data::student::{Student, StudentId, StudentPayload},
    error::{DecodeBodySnafu, RejectedRequestSnafu, RosterResult, SendRequestSnafu},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use snafu::{ResultExt, ensure};
use std::{fmt::Debug, sync::Arc};

/// The remote students collection.
#[async_trait]
pub trait StudentApi: Debug + Send + Sync {
    async fn list(&self) -> RosterResult<Vec<Student>>;
    async fn create(&self, payload: &StudentPayload) -> RosterResult<()>;
    async fn update(&self, id: StudentId, payload: &StudentPayload) -> RosterResult<()>;
    async fn delete(&self, id: StudentId) -> RosterResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    config: Arc<ApiConfig>,
}

impl HttpStudentApi {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub const fn with_client(client: Client, config: Arc<ApiConfig>) -> Self {
        Self { client, config }
    }

    /// Turns a non-success reply to a create/update into [`RosterError::RejectedRequest`],
    /// pulling `message` out of the JSON body when there is one.
    ///
    /// A body that isn't JSON at all is a decode error rather than a rejection.
    ///
    /// [`RosterError::RejectedRequest`]: crate::error::RosterError::RejectedRequest
    async fn check_saved(response: Response, url: &str) -> RosterResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: Value = response.json().await.context(DecodeBodySnafu { url })?;
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string);

        RejectedRequestSnafu { status, message }.fail()
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list(&self) -> RosterResult<Vec<Student>> {
        let url = self.config.collection_url();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(SendRequestSnafu { method: "GET", url })?;

        let status = response.status();
        ensure!(
            status.is_success(),
            RejectedRequestSnafu {
                status,
                message: None::<String>
            }
        );

        response.json().await.context(DecodeBodySnafu { url })
    }

    async fn create(&self, payload: &StudentPayload) -> RosterResult<()> {
        let url = self.config.collection_url();
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .context(SendRequestSnafu { method: "POST", url })?;

        Self::check_saved(response, url).await
    }

    async fn update(&self, id: StudentId, payload: &StudentPayload) -> RosterResult<()> {
        let url = self.config.record_url(id);
        let response = self
            .client
            .put(&url)
            .json(payload)
            .send()
            .await
            .context(SendRequestSnafu {
                method: "PUT",
                url: &url,
            })?;

        Self::check_saved(response, &url).await
    }

    async fn delete(&self, id: StudentId) -> RosterResult<()> {
        let url = self.config.record_url(id);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context(SendRequestSnafu {
                method: "DELETE",
                url: &url,
            })?;

        let status = response.status();
        ensure!(
            status.is_success(),
            RejectedRequestSnafu {
                status,
                message: None::<String>
            }
        );
        Ok(())
    }
}
