use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recommend::advice;

/// Inbound body of `POST /api/weather`.
///
/// Fields are kept as raw JSON so a value of an unexpected type stays
/// present instead of failing the whole decode. JSON `null` reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherRequest {
    pub token: Option<Value>,
    pub requester_name: Option<Value>,
    pub location: Option<Value>,
    pub date: Option<Value>,
}

impl WeatherRequest {
    /// Lenient decode: a body that is not a JSON object reads as "all fields absent".
    pub fn from_json_lenient(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Location as forwarded to the provider.
    pub fn location_text(&self) -> String {
        as_text(self.location.as_ref())
    }

    /// Date as forwarded to the provider.
    pub fn date_text(&self) -> String {
        as_text(self.date.as_ref())
    }
}

/// Strings pass through unquoted, other JSON values use their JSON text,
/// absent values become empty.
fn as_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The provider's reading for the requested day, still in Fahrenheit.
#[derive(Debug, Clone, PartialEq)]
pub struct DayObservation {
    pub temp_f: f64,
    pub conditions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub temp_c: f64,
    pub condition: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub requester_name: Option<Value>,
    pub timestamp: String,
    pub location: Option<Value>,
    pub date: Option<Value>,
    pub weather: WeatherResult,
    pub advice: String,
}

impl ResponseEnvelope {
    pub fn assemble(request: WeatherRequest, weather: WeatherResult, now: DateTime<Utc>) -> Self {
        let advice = advice(&weather.recommendations);
        Self {
            requester_name: request.requester_name,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            location: request.location,
            date: request.date,
            weather,
            advice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn lenient_decode_treats_garbage_as_empty() {
        let req = WeatherRequest::from_json_lenient(b"not json {");
        assert!(req.token.is_none());
        assert!(req.location.is_none());
        assert_eq!(req.location_text(), "");
    }

    #[test]
    fn lenient_decode_treats_non_object_as_empty() {
        let req = WeatherRequest::from_json_lenient(br#"["token", "123"]"#);
        assert!(req.token.is_none());
    }

    #[test]
    fn lenient_decode_accepts_null_requester() {
        let req = WeatherRequest::from_json_lenient(
            br#"{"token":"t","requester_name":null,"location":"Kyiv","date":"2024-01-01"}"#,
        );
        assert_eq!(req.token, Some(json!("t")));
        assert!(req.requester_name.is_none());
        assert_eq!(req.location_text(), "Kyiv");
        assert_eq!(req.date_text(), "2024-01-01");
    }

    #[test]
    fn mistyped_fields_keep_the_rest_of_the_body() {
        let req = WeatherRequest::from_json_lenient(
            br#"{"token":123,"requester_name":42,"location":"Kyiv","date":20240101}"#,
        );
        assert_eq!(req.token, Some(json!(123)));
        assert_eq!(req.requester_name, Some(json!(42)));
        assert_eq!(req.location_text(), "Kyiv");
        assert_eq!(req.date_text(), "20240101");
    }

    #[test]
    fn envelope_has_zulu_timestamp_and_advice() {
        let request = WeatherRequest {
            token: Some(json!("t")),
            requester_name: Some(json!("Ann")),
            location: Some(json!("Oslo")),
            date: Some(json!("2024-03-01")),
        };
        let weather = WeatherResult {
            temp_c: 10.0,
            condition: "Rain".into(),
            recommendations: vec!["a light jacket".into(), "an umbrella".into()],
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let envelope = ResponseEnvelope::assemble(request, weather, now);

        assert_eq!(envelope.timestamp, "2024-03-01T12:30:00.000000Z");
        assert_eq!(envelope.requester_name, Some(json!("Ann")));
        assert_eq!(
            envelope.advice,
            "Based on the weather, consider wearing a light jacket, an umbrella."
        );

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["weather"]["condition"], "Rain");
    }

    #[test]
    fn envelope_echoes_non_string_requester_verbatim() {
        let request = WeatherRequest { requester_name: Some(json!(42)), ..Default::default() };
        let weather = WeatherResult {
            temp_c: 20.0,
            condition: "Clear".into(),
            recommendations: vec!["a t-shirt".into()],
        };

        let envelope = ResponseEnvelope::assemble(request, weather, Utc::now());
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["requester_name"], json!(42));
        assert!(json["location"].is_null());
    }
}
