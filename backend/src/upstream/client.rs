//! HTTP client for the upstream tracking API
//!
//! # Design Principles
//!
//! 1. **Missing is not an error**: a 404 for a single log and a 422 for a
//!    prediction both mean "nothing to show yet" and come back as `Ok(None)`.
//! 2. **One retry**: a 401 triggers a single token refresh and one retry; a
//!    second 401 is surfaced as [`UpstreamError::Unauthorized`].
//! 3. **Stateless client**: credentials live in the per-request [`Session`],
//!    so one client is shared by every request.

use super::error::UpstreamError;
use super::session::{RotatedTokens, Session};
use crate::config::UpstreamConfig;
use chrono::NaiveDate;
use recovery_calendar_shared::{DailyLogRecord, MacroTargets, RecoveryPrediction};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Token pair returned by `/auth/refresh`
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    user_id: &'a str,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predicted_recovery_rating: f64,
}

/// Macro targets as stored on the upstream profile; any key may be absent
#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileMacroTargets {
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
}

impl From<ProfileMacroTargets> for MacroTargets {
    fn from(targets: ProfileMacroTargets) -> Self {
        let grams = |value: Option<f64>| value.map(|v| v.round() as i64).unwrap_or(0);
        MacroTargets {
            protein: grams(targets.protein),
            carbs: grams(targets.carbs),
            fat: grams(targets.fat),
        }
    }
}

/// Subset of `/users/me` the gateway needs
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    macro_targets: Option<ProfileMacroTargets>,
}

impl UserProfile {
    /// Macro targets in grams; unset targets are 0
    pub fn macro_targets(&self) -> MacroTargets {
        self.macro_targets.clone().map(MacroTargets::from).unwrap_or_default()
    }
}

/// Upstream API client, cheap to clone
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new client from configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `/daily-log/history`
    pub async fn fetch_log_history(
        &self,
        session: &Session,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<DailyLogRecord>, UpstreamError> {
        debug!(%start, days, "Fetching log history");
        let url = self.url("/daily-log/history");
        let response = self
            .send(session, |http| http.get(&url).query(&history_query(start, days)))
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// GET `/recovery/history`
    pub async fn fetch_recovery_history(
        &self,
        session: &Session,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<RecoveryPrediction>, UpstreamError> {
        debug!(%start, days, "Fetching recovery history");
        let url = self.url("/recovery/history");
        let response = self
            .send(session, |http| http.get(&url).query(&history_query(start, days)))
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// GET `/daily-log`; `None` when no log exists for the date
    pub async fn get_daily_log(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<Option<DailyLogRecord>, UpstreamError> {
        let url = self.url("/daily-log");
        let response = self
            .send(session, |http| http.get(&url).query(&[("date", date.to_string())]))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%date, "No daily log");
            return Ok(None);
        }
        Ok(Some(ensure_success(response).await?.json().await?))
    }

    /// POST `/recovery/predict`; `None` when the model lacks inputs
    pub async fn predict_recovery(
        &self,
        session: &Session,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<f64>, UpstreamError> {
        let url = self.url("/recovery/predict");
        let body = PredictRequest { user_id, date };
        let response = self.send(session, |http| http.post(&url).json(&body)).await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            debug!(%date, "Recovery prediction not available yet");
            return Ok(None);
        }
        let prediction: PredictResponse = ensure_success(response).await?.json().await?;
        Ok(Some(prediction.predicted_recovery_rating))
    }

    /// GET `/users/me`
    pub async fn fetch_me(&self, session: &Session) -> Result<UserProfile, UpstreamError> {
        let url = self.url("/users/me");
        let response = self.send(session, |http| http.get(&url)).await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Check the upstream answers without a server error
    ///
    /// Client errors still count as reachable: the root path may be
    /// unauthenticated-only or absent.
    pub async fn probe(&self) -> Result<(), UpstreamError> {
        let response = self.http.get(self.url("/")).send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Send an authorized request, refreshing and retrying once on 401
    async fn send<F>(&self, session: &Session, build: F) -> Result<Response, UpstreamError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let (token, generation) = session.access().await;
        let response = build(&self.http).bearer_auth(&token).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Upstream returned 401, refreshing tokens");
        let refreshed = session
            .refresh_with(generation, |refresh_token| self.refresh(refresh_token))
            .await?;
        if !refreshed {
            return Err(UpstreamError::Unauthorized);
        }

        let (token, _) = session.access().await;
        let response = build(&self.http).bearer_auth(&token).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Upstream rejected refreshed access token");
            return Err(UpstreamError::Unauthorized);
        }
        Ok(response)
    }

    /// POST `/auth/refresh` with the refresh token as bearer
    async fn refresh(&self, refresh_token: String) -> Result<Option<RotatedTokens>, UpstreamError> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .bearer_auth(&refresh_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Upstream rejected refresh token");
            return Ok(None);
        }
        let tokens: TokenResponse = ensure_success(response).await?.json().await?;
        info!("Upstream tokens rotated");

        Ok(Some(RotatedTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }))
    }
}

fn history_query(start: NaiveDate, days: u32) -> [(&'static str, String); 2] {
    [("start", start.to_string()), ("days", days.to_string())]
}

/// Turn a non-2xx response into [`UpstreamError::Status`]
async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "Upstream request failed");
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body,
    })
}
