use crate::{
    data::student::StudentId,
    error::{BadEnvVarSnafu, RosterResult},
};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, sync::Arc};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/students";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            server_ip: var_or_default("ROSTER_SERVER_IP", DEFAULT_SERVER_IP)?.into(),
        })
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

impl Default for RuntimeConfiguration {
    fn default() -> Self {
        Self {
            api_config: Arc::new(ApiConfig::default()),
            server_ip: DEFAULT_SERVER_IP.into(),
        }
    }
}

/// Where the students collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new() -> RosterResult<Self> {
        Ok(Self::from_base_url(var_or_default(
            "STUDENTS_API_URL",
            DEFAULT_API_URL,
        )?))
    }

    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    pub fn record_url(&self, id: StudentId) -> String {
        format!("{}/{id}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_base_url(DEFAULT_API_URL)
    }
}

fn var_or_default(name: &'static str, default: &str) -> RosterResult<String> {
    match var(name) {
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
        other => other.context(BadEnvVarSnafu { name }),
    }
}
