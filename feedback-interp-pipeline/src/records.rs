//! Feedback records listing
//!
//! Wire type and client for the records endpoint, which lists past
//! interpretations as `{ _id, created_at, input_text, options, output_text }`.
//! Every field is optional on the wire; the display helpers substitute the
//! placeholders shown by the log viewer. Stored options are read leniently:
//! unknown keys are ignored so one odd record cannot break the whole listing.

use crate::error::{InterpretError, InterpretResult};
use crate::interpreter::{endpoint_from_env, http_client, parse_endpoint};
use chrono::{DateTime, NaiveDateTime, Utc};
use feedback_interp::FeedbackOptions;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One past interpretation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub input_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_options")]
    pub options: Option<FeedbackOptions>,
    #[serde(default)]
    pub output_text: Option<String>,
}

impl FeedbackRecord {
    /// Record stamped with the given creation time
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        input_text: impl Into<String>,
        options: FeedbackOptions,
        output_text: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            created_at: Some(created_at.to_rfc3339()),
            input_text: Some(input_text.into()),
            options: Some(options),
            output_text: Some(output_text.into()),
        }
    }

    pub fn input_display(&self) -> &str {
        non_empty(&self.input_text).unwrap_or("No input text")
    }

    pub fn output_display(&self) -> &str {
        non_empty(&self.output_text).unwrap_or("No output generated")
    }

    pub fn options_display(&self) -> String {
        self.options
            .map(|options| options.describe())
            .unwrap_or_else(|| "None".to_string())
    }

    pub fn created_at_display(&self) -> String {
        format_created_at(self.created_at.as_deref())
    }
}

/// Read stored options as an open map, keeping only the known flags
///
/// A flag is set when its value is truthy. A missing or `null` map gives `None`;
/// any other non-object value gives all flags off.
fn lenient_options<'de, D>(deserializer: D) -> Result<Option<FeedbackOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|value| {
        let flag = |name: &str| value.get(name).is_some_and(truthy);
        FeedbackOptions::new()
            .with_simplify(flag("simplify"))
            .with_soften(flag("soften"))
            .with_case_support(flag("caseSupport"))
    }))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Format a record timestamp as `"January 5, 2026 at 3:04 PM"` (UTC)
///
/// Accepts RFC 3339 and naive ISO 8601 timestamps, with either `T` or a space
/// between date and time (naive ones are taken as UTC). Missing values
/// give `"N/A"`; anything unparseable is returned unchanged.
pub fn format_created_at(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|dt| dt.and_utc())
        });

    match parsed {
        Ok(dt) => dt.format("%B %-d, %Y at %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Client for the records endpoint
#[derive(Debug, Clone)]
pub struct RecordsClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl RecordsClient {
    /// Environment variable holding the endpoint URL
    pub const ENDPOINT_ENV: &'static str = "FEEDBACK_RECORDS_URL";

    pub fn new(endpoint: &str) -> InterpretResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn from_env() -> InterpretResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: endpoint_from_env(Self::ENDPOINT_ENV)?,
        })
    }

    /// Fetch every record the endpoint lists, in the order it lists them
    ///
    /// A `null` body is treated as an empty listing.
    pub async fn fetch(&self) -> InterpretResult<Vec<FeedbackRecord>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InterpretError::StatusError {
                status: status.as_u16(),
                detail: None,
            });
        }

        let body = response.text().await?;
        let records: Option<Vec<FeedbackRecord>> = serde_json::from_str(&body).map_err(|e| {
            InterpretError::MalformedResponse(format!("Failed to parse records: {}", e))
        })?;
        let records = records.unwrap_or_default();

        debug!(count = records.len(), endpoint = %self.endpoint, "fetched feedback records");
        Ok(records)
    }
}
