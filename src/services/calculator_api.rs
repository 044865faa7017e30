//! Trait and HTTP client for the remote GPA calculator service.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use crate::contract::{CalculationPayload, CalculationResponse};
use crate::fetch::{HttpClient, exchange_json, probe};

#[async_trait]
pub trait CalculatorApi {
    /// Submits subjects and returns the service's semester GPA.
    async fn calculate(&self, payload: &CalculationPayload) -> Result<CalculationResponse>;

    async fn health(&self) -> bool;
}

/// [`CalculatorApi`] over HTTP: `POST /calculate`, `GET /health`.
pub struct CalculatorClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> CalculatorClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> CalculatorApi for CalculatorClient<C> {
    #[tracing::instrument(skip_all, fields(subjects = payload.subjects.len()))]
    async fn calculate(&self, payload: &CalculationPayload) -> Result<CalculationResponse> {
        let url = format!("{}/calculate", self.base_url);
        debug!(url = %url, "Submitting subjects");

        let response: CalculationResponse = exchange_json(
            &self.http,
            Method::POST,
            &url,
            Some(payload),
            "failed to calculate the average",
        )
        .await?;

        info!(
            semester_gpa = response.semester_gpa,
            total_credits = response.total_credits,
            "Calculation received"
        );
        Ok(response)
    }

    async fn health(&self) -> bool {
        probe(&self.http, &format!("{}/health", self.base_url)).await
    }
}
