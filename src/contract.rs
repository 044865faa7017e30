//! JSON shapes spoken by the auth and calculator services.
//!
//! The calculator service answers with
//! `{subjects, total_credits, semester_gpa, message}`; the local engine
//! produces `{weightedSum, totalCredits, average}`.
//! [`CalculationResponse::to_summary`] maps the former onto the latter.

use serde::{Deserialize, Serialize};

use crate::engine::{GradeSummary, round_to_hundredths};
use crate::subject::SubjectEntry;

/// One subject in a calculation request.
pub type SubjectPayload = SubjectEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationPayload {
    pub subjects: Vec<SubjectPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub name: String,
    pub grade: f64,
    pub credits: f64,
    pub weighted_grade: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub subjects: Vec<SubjectResult>,
    pub total_credits: f64,
    pub semester_gpa: f64,
    #[serde(default)]
    pub message: String,
}

impl CalculationResponse {
    /// Maps the service response onto the engine's summary shape.
    ///
    /// `weighted_sum` is the sum of the per-subject `weighted_grade` values;
    /// `semester_gpa` is re-rounded to two places.
    pub fn to_summary(&self) -> GradeSummary {
        GradeSummary {
            weighted_sum: self.subjects.iter().map(|s| s.weighted_grade).sum(),
            total_credits: self.total_credits,
            average: round_to_hundredths(self.semester_gpa),
        }
    }
}

/// Tolerance used when comparing a remote summary with a local one.
pub const SUMMARY_TOLERANCE: f64 = 1e-6;

/// `true` when both summaries agree on every field within [`SUMMARY_TOLERANCE`].
pub fn summaries_agree(a: &GradeSummary, b: &GradeSummary) -> bool {
    (a.weighted_sum - b.weighted_sum).abs() < SUMMARY_TOLERANCE
        && (a.total_credits - b.total_credits).abs() < SUMMARY_TOLERANCE
        && (a.average - b.average).abs() < SUMMARY_TOLERANCE
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "correo_institucional")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    #[serde(rename = "correo_institucional")]
    pub email: String,
    #[serde(rename = "dni")]
    pub national_id: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    #[serde(rename = "correo_institucional")]
    pub email: String,
    #[serde(rename = "dni")]
    pub national_id: String,
    pub created_at: String,
}

/// Error body returned by the services on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `detail` field rendered as text, if present.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
