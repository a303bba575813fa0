use crate::{
    api::{HttpStudentApi, StudentApi},
    client::StudentClient,
    config::RuntimeConfiguration,
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RosterState {
    config: RuntimeConfiguration,
    client: StudentClient,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> Self {
        let api = HttpStudentApi::new(config.api_config());
        Self::with_api(config, Arc::new(api))
    }

    pub fn with_api(config: RuntimeConfiguration, api: Arc<dyn StudentApi>) -> Self {
        Self {
            config,
            client: StudentClient::new(api),
        }
    }

    pub const fn client(&self) -> &StudentClient {
        &self.client
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    meta name="htmx-config" content="{\"scrollBehavior\":\"smooth\"}" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white py-8" {
                    (markup)
                }
            }
        }
    }
}
