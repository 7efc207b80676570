use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::BookingProvider;
use crate::models::{BookingConfirmation, BookingRequest};

pub struct CalendlyBooking {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl CalendlyBooking {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookingProvider for CalendlyBooking {
    async fn create_booking(&self, request: &BookingRequest) -> anyhow::Result<BookingConfirmation> {
        let (first_name, last_name) = request.patient.split_name();
        let body = json!({
            "event_type": request.event_type,
            "start_time": request.start_time.to_rfc3339(),
            "invitees": [{
                "email": request.patient.email,
                "first_name": first_name,
                "last_name": last_name,
            }],
        });

        let data: serde_json::Value = self
            .client
            .post(format!("{}/scheduled_events", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call Calendly booking API")?
            .error_for_status()
            .context("Calendly booking API returned error")?
            .json()
            .await
            .context("failed to parse Calendly booking response")?;

        let confirmation_code = confirmation_code(&data)
            .ok_or_else(|| anyhow::anyhow!("missing event uri in Calendly booking response"))?;

        Ok(BookingConfirmation {
            confirmation_code,
            start_time: request.start_time,
        })
    }
}

/// Last path segment of the created event's URI.
fn confirmation_code(data: &serde_json::Value) -> Option<String> {
    data["resource"]["uri"]
        .as_str()
        .or_else(|| data["uri"].as_str())
        .and_then(|uri| uri.trim_end_matches('/').rsplit('/').next())
        .filter(|code| !code.is_empty())
        .map(|code| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_code_from_resource() {
        let data = json!({"resource": {"uri": "https://api.calendly.com/scheduled_events/ABC123"}});
        assert_eq!(confirmation_code(&data), Some("ABC123".to_string()));
    }

    #[test]
    fn test_confirmation_code_from_top_level_uri() {
        let data = json!({"uri": "https://api.calendly.com/scheduled_events/XYZ/"});
        assert_eq!(confirmation_code(&data), Some("XYZ".to_string()));
    }

    #[test]
    fn test_confirmation_code_missing() {
        assert_eq!(confirmation_code(&json!({})), None);
        assert_eq!(confirmation_code(&json!({"uri": ""})), None);
    }
}
