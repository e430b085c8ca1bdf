//! Client for the external motivation text-generation service.
//!
//! The service is an opaque collaborator: it takes a habit name, a
//! 7-day completion rate, and the reasons recorded for missed days, and
//! returns one free-text tip. Every failure mode maps to
//! [`MotivationError`] so callers can degrade to [`FALLBACK_TIP`]
//! instead of crashing.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::MotivationError;
use crate::habit::{Habit, HabitLog};
use crate::range::{dates_in_range, RangeKind};
use crate::storage::MotivationConfig;

/// Shown whenever the service is unreachable or misbehaves.
pub const FALLBACK_TIP: &str =
    "The motivation assistant cannot be reached right now. Please try again later.";

/// Request schema of the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationRequest {
    pub habit_name: String,
    /// Share of the last 7 days completed, 0.0 to 1.0.
    pub completion_rate: f64,
    pub reasons_for_missing: String,
}

/// Response schema of the generation endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationResponse {
    pub motivation_tip: String,
}

/// Build the request for a habit from its last-7-day logs.
///
/// Days without a log count as missed; reasons are joined in day order.
pub fn request_for_habit(habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> MotivationRequest {
    let window = dates_in_range(RangeKind::Weekly, today);

    let mut completed = 0usize;
    let mut reasons: Vec<&str> = Vec::new();
    for date in &window {
        match logs
            .iter()
            .find(|log| log.habit_id == habit.id && log.date == *date)
        {
            Some(log) if log.completed => completed += 1,
            Some(log) => {
                if let Some(reason) = log.reason_for_miss.as_deref() {
                    if !reason.is_empty() {
                        reasons.push(reason);
                    }
                }
            }
            None => {}
        }
    }

    MotivationRequest {
        habit_name: habit.name.clone(),
        completion_rate: completed as f64 / window.len() as f64,
        reasons_for_missing: if reasons.is_empty() {
            "none recorded".to_string()
        } else {
            reasons.join("; ")
        },
    }
}

/// HTTP client for the motivation endpoint.
pub struct MotivationClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl MotivationClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: Client::new(),
        }
    }

    /// Build a client from config.
    ///
    /// # Errors
    /// Returns `MissingEndpoint` when no endpoint is configured.
    pub fn from_config(cfg: &MotivationConfig) -> Result<Self, MotivationError> {
        match cfg.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => {
                Ok(Self::new(endpoint, cfg.api_key.clone()))
            }
            _ => Err(MotivationError::MissingEndpoint),
        }
    }

    /// POST the request and decode the tip.
    ///
    /// # Errors
    /// Network failures, non-success statuses, and schema mismatches
    /// all surface as [`MotivationError`]; callers are expected to fall
    /// back to [`FALLBACK_TIP`].
    pub async fn generate(
        &self,
        request: &MotivationRequest,
    ) -> Result<MotivationResponse, MotivationError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MotivationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MotivationError::Http {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<MotivationResponse>()
            .await
            .map_err(|e| MotivationError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::HabitCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn habit() -> Habit {
        Habit::new("Morning Journal", HabitCategory::Morning).unwrap()
    }

    #[test]
    fn request_counts_unlogged_days_as_missed() {
        let h = habit();
        let today = d(2024, 6, 15);
        let logs = vec![
            HabitLog::new(&h.id, d(2024, 6, 15), true, None, None),
            HabitLog::new(&h.id, d(2024, 6, 14), true, None, None),
            HabitLog::new(&h.id, d(2024, 6, 13), false, None, Some("too busy".into())),
        ];

        let req = request_for_habit(&h, &logs, today);
        assert_eq!(req.habit_name, "Morning Journal");
        assert!((req.completion_rate - 2.0 / 7.0).abs() < 1e-9);
        assert_eq!(req.reasons_for_missing, "too busy");
    }

    #[test]
    fn request_ignores_logs_outside_the_window() {
        let h = habit();
        let logs = vec![HabitLog::new(&h.id, d(2024, 5, 1), true, None, None)];
        let req = request_for_habit(&h, &logs, d(2024, 6, 15));
        assert_eq!(req.completion_rate, 0.0);
        assert_eq!(req.reasons_for_missing, "none recorded");
    }

    #[test]
    fn request_joins_reasons_in_day_order() {
        let h = habit();
        let logs = vec![
            HabitLog::new(&h.id, d(2024, 6, 14), false, None, Some("tired".into())),
            HabitLog::new(&h.id, d(2024, 6, 12), false, None, Some("travel".into())),
        ];
        let req = request_for_habit(&h, &logs, d(2024, 6, 15));
        assert_eq!(req.reasons_for_missing, "travel; tired");
    }

    #[test]
    fn request_serializes_camel_case() {
        let req = MotivationRequest {
            habit_name: "Journal".into(),
            completion_rate: 0.5,
            reasons_for_missing: "none recorded".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("habitName").is_some());
        assert!(json.get("completionRate").is_some());
        assert!(json.get("reasonsForMissing").is_some());
    }

    #[test]
    fn from_config_requires_an_endpoint() {
        let cfg = MotivationConfig::default();
        assert!(matches!(
            MotivationClient::from_config(&cfg),
            Err(MotivationError::MissingEndpoint)
        ));
    }

    #[tokio::test]
    async fn generate_decodes_a_tip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"motivationTip": "Two out of seven is a start."}"#)
            .create_async()
            .await;

        let client = MotivationClient::new(server.url(), None);
        let req = MotivationRequest {
            habit_name: "Journal".into(),
            completion_rate: 2.0 / 7.0,
            reasons_for_missing: "too busy".into(),
        };
        let resp = client.generate(&req).await.unwrap();
        assert_eq!(resp.motivation_tip, "Two out of seven is a start.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_maps_server_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(503)
            .create_async()
            .await;

        let client = MotivationClient::new(server.url(), None);
        let req = MotivationRequest {
            habit_name: "Journal".into(),
            completion_rate: 0.0,
            reasons_for_missing: "none recorded".into(),
        };
        assert!(matches!(
            client.generate(&req).await,
            Err(MotivationError::Http { status: 503 })
        ));
    }

    #[tokio::test]
    async fn generate_rejects_malformed_bodies() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let client = MotivationClient::new(server.url(), None);
        let req = MotivationRequest {
            habit_name: "Journal".into(),
            completion_rate: 0.0,
            reasons_for_missing: "none recorded".into(),
        };
        assert!(matches!(
            client.generate(&req).await,
            Err(MotivationError::InvalidResponse(_))
        ));
    }
}
