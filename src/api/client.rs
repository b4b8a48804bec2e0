use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use super::types::{
    CityUpdate, ErrorBody, HolidaysResponse, MutationResponse, NearbyResponse, OnboardResponse,
    OnboardingRequest, PersonaMessageResponse, PersonaUpdateResponse, PlanDayRequest,
    PlanDayResponse, ProfileResponse, SubscribeRequest, SubscribeResponse, TaskEnvelope,
    TaskPayload, TasksResponse, UserPlacePayload, UserPlacesResponse, WireHoliday, WirePlace,
    WireTask, WireUserPlace,
};
use super::ApiError;
use crate::core::explore::{Holiday, Place, UserPlace};
use crate::core::session::{Persona, Session, SubscriptionPlan};
use crate::core::task::Task;

/// Thin request/response gateway to the companion backend. Pure mapping: no
/// caching, no retries, every failure handed back to the caller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http: Client::new(),
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("HTTP {}", status));
        match status {
            StatusCode::PAYMENT_REQUIRED => Err(ApiError::Payment(detail)),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::Validation(detail))
            }
            _ => Err(ApiError::Network(format!("HTTP {}: {}", status, detail))),
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("unreadable response: {}", e)))
    }

    // --- Session ---

    /// Submit a new-user profile. The returned token is not installed here;
    /// the caller persists it and rebuilds the client.
    pub async fn onboard(&self, request: &OnboardingRequest) -> Result<OnboardResponse, ApiError> {
        let resp = self
            .send(self.request(Method::POST, "/api/onboarding").json(request))
            .await?;
        Self::json(resp).await
    }

    pub async fn fetch_profile(&self) -> Result<Session, ApiError> {
        let resp = self.send(self.request(Method::GET, "/api/user/profile")).await?;
        let profile: ProfileResponse = Self::json(resp).await?;
        Ok(Session {
            user: profile.user,
            trial: profile.trial_status,
        })
    }

    /// Returns the persona's welcome message.
    pub async fn update_persona(&self, persona: Persona) -> Result<Option<String>, ApiError> {
        let resp = self
            .send(
                self.request(Method::PUT, "/api/user/persona")
                    .query(&[("persona", persona.as_str())]),
            )
            .await?;
        let body: PersonaUpdateResponse = Self::json(resp).await?;
        Ok(body.welcome_message.or(body.message))
    }

    pub async fn update_city(&self, update: &CityUpdate) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, "/api/user/city").json(update))
            .await?;
        Ok(())
    }

    pub async fn subscribe(&self, plan: SubscriptionPlan) -> Result<Option<String>, ApiError> {
        let request = SubscribeRequest {
            plan: plan.as_str().to_string(),
        };
        let resp = self
            .send(self.request(Method::POST, "/api/payment/subscribe").json(&request))
            .await?;
        let body: SubscribeResponse = Self::json(resp).await?;
        if body.success {
            Ok(body.message)
        } else {
            Err(ApiError::Payment(
                body.message
                    .unwrap_or_else(|| "Payment was not accepted".to_string()),
            ))
        }
    }

    // --- Tasks ---

    pub async fn list_tasks(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .send(self.request(Method::GET, "/api/tasks").query(&[
                ("start_date", format!("{}T00:00:00", start.format("%Y-%m-%d"))),
                ("end_date", format!("{}T23:59:59", end.format("%Y-%m-%d"))),
            ]))
            .await?;
        let body: TasksResponse = Self::json(resp).await?;
        Ok(body.tasks.into_iter().filter_map(WireTask::into_task).collect())
    }

    pub async fn list_tasks_for_date(&self, date: NaiveDate) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .send(
                self.request(Method::GET, "/api/tasks")
                    .query(&[("date", format!("{}T00:00:00", date.format("%Y-%m-%d")))]),
            )
            .await?;
        let body: TasksResponse = Self::json(resp).await?;
        Ok(body.tasks.into_iter().filter_map(WireTask::into_task).collect())
    }

    /// Create a task; returns the stored record and the persona message.
    pub async fn create_task(&self, task: &Task) -> Result<(Option<Task>, Option<String>), ApiError> {
        let payload = TaskPayload::from(task);
        let resp = self
            .send(self.request(Method::POST, "/api/tasks").json(&payload))
            .await?;
        let body: TaskEnvelope = Self::json(resp).await?;
        Ok((body.task.into_task(), body.message))
    }

    pub async fn update_task(&self, id: &str, task: &Task) -> Result<Option<String>, ApiError> {
        let payload = TaskPayload::from(task);
        let resp = self
            .send(
                self.request(Method::PUT, &format!("/api/tasks/{}", id))
                    .json(&payload),
            )
            .await?;
        let body: MutationResponse = Self::json(resp).await?;
        Ok(body.persona_message.or(body.message))
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/tasks/{}", id)))
            .await?;
        Ok(())
    }

    /// Request the backend-generated timeline for a date. Ordering logic is
    /// entirely server-side; the result is rendered verbatim.
    pub async fn plan_day(&self, date: NaiveDate) -> Result<(Vec<Task>, Option<String>), ApiError> {
        let request = PlanDayRequest {
            date: format!("{}T00:00:00", date.format("%Y-%m-%d")),
        };
        let resp = self
            .send(self.request(Method::POST, "/api/plan-day").json(&request))
            .await?;
        let body: PlanDayResponse = Self::json(resp).await?;
        let timeline = body
            .timeline
            .into_iter()
            .filter_map(WireTask::into_task)
            .collect();
        Ok((timeline, body.message))
    }

    // --- Discovery ---

    pub async fn nearby_places(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<(Vec<Place>, Option<String>), ApiError> {
        let resp = self
            .send(
                self.request(Method::GET, "/api/explore/nearby")
                    .query(&[("lat", lat), ("lng", lng)]),
            )
            .await?;
        let body: NearbyResponse = Self::json(resp).await?;
        let places = body.places.into_iter().map(WirePlace::into_place).collect();
        Ok((places, body.message))
    }

    pub async fn holidays(&self, date: NaiveDate) -> Result<Vec<Holiday>, ApiError> {
        let resp = self
            .send(
                self.request(Method::GET, "/api/recommendations/holidays")
                    .query(&[("date", format!("{}T00:00:00", date.format("%Y-%m-%d")))]),
            )
            .await?;
        let body: HolidaysResponse = Self::json(resp).await?;
        Ok(body
            .holidays
            .into_iter()
            .filter_map(WireHoliday::into_holiday)
            .collect())
    }

    pub async fn persona_message(&self, kind: &str) -> Result<String, ApiError> {
        let resp = self
            .send(self.request(Method::GET, &format!("/api/persona-message/{}", kind)))
            .await?;
        let body: PersonaMessageResponse = Self::json(resp).await?;
        Ok(body.message)
    }

    // --- User-curated places ---

    pub async fn list_places(&self) -> Result<Vec<UserPlace>, ApiError> {
        let resp = self.send(self.request(Method::GET, "/api/events")).await?;
        let body: UserPlacesResponse = Self::json(resp).await?;
        Ok(body
            .events
            .into_iter()
            .map(WireUserPlace::into_user_place)
            .collect())
    }

    pub async fn create_place(&self, place: &UserPlace) -> Result<(), ApiError> {
        let payload = UserPlacePayload::from(place);
        self.send(self.request(Method::POST, "/api/events").json(&payload))
            .await?;
        Ok(())
    }

    pub async fn update_place(&self, id: &str, place: &UserPlace) -> Result<(), ApiError> {
        let payload = UserPlacePayload::from(place);
        self.send(
            self.request(Method::PUT, &format!("/api/events/{}", id))
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_place(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/events/{}", id)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8001/");
        assert_eq!(client.base_url, "http://localhost:8001");
        assert!(!client.has_token());
    }
}
