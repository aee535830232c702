use anyhow::Context;
use async_trait::async_trait;

use super::{Notifier, TemplateParams};
use crate::config::AppConfig;

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub struct EmailJsNotifier {
    service_id: String,
    template_id: String,
    public_key: String,
    client: reqwest::Client,
}

impl EmailJsNotifier {
    pub fn new(service_id: String, template_id: String, public_key: String) -> Self {
        Self {
            service_id,
            template_id,
            public_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.emailjs_service_id.clone(),
            config.emailjs_template_id.clone(),
            config.emailjs_public_key.clone(),
        )
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, params: &TemplateParams) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.public_key,
            "template_params": params,
        });

        self.client
            .post(EMAILJS_SEND_URL)
            .json(&body)
            .send()
            .await
            .context("failed to send EmailJS request")?
            .error_for_status()
            .context("EmailJS API returned error")?;

        Ok(())
    }
}
