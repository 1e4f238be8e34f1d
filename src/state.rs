use crate::{api::ApiClient, config::RuntimeConfiguration, routes::sse::RefreshEvent};
use maud::{DOCTYPE, Markup, html};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::broadcast::{Receiver, Sender, channel};

#[derive(Clone, Debug)]
pub struct RosterState {
    api: ApiClient,
    refresh_sender: Sender<RefreshEvent>,
    refresh_generation: Arc<AtomicU64>,
}

impl RosterState {
    #[must_use]
    pub fn new(config: &RuntimeConfiguration) -> Self {
        let (tx, _rx) = channel(8);

        Self {
            api: ApiClient::new(config.api_base_url()),
            refresh_sender: tx,
            refresh_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    // response-targets routes error partials into per-section slots,
                    // leaving the last good content in place.
                    script src="https://unpkg.com/htmx-ext-response-targets@2.0.2" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body hx-ext="sse,response-targets" class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (markup)
                }
            }
        }
    }

    pub fn subscribe_to_refresh_feed(&self) -> Receiver<RefreshEvent> {
        self.refresh_sender.subscribe()
    }

    /// Bump the shared refresh signal. Called after a successful
    /// creation so the listing and statistics sections refetch.
    pub fn students_changed(&self) -> u64 {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.refresh_sender.send(RefreshEvent { generation });
        generation
    }

    #[must_use]
    pub fn refresh_generation(&self) -> u64 {
        self.refresh_generation.load(Ordering::SeqCst)
    }
}
