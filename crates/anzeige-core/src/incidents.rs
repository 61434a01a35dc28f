use serde::{Deserialize, Serialize};

use crate::locations::Location;

/// A location name guessed from incident content, with how sure the guess is.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    pub name: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

/// Best-effort structured guess of when and where an incident happened.
///
/// Every field may be absent; partial results are the normal case. The
/// location name and its confidence travel together, so a result without a
/// location always reports a confidence of `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "ExtractionRecord", try_from = "ExtractionRecord")]
pub struct ExtractionResult {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `HH:MM`, 24-hour clock.
    pub time: Option<String>,
    location: Option<LocationMatch>,
}

impl ExtractionResult {
    #[must_use]
    pub fn new(
        date: Option<String>,
        time: Option<String>,
        location: Option<LocationMatch>,
    ) -> Self {
        Self {
            date,
            time,
            location: location.map(|m| LocationMatch {
                confidence: m.confidence.clamp(0.0, 1.0),
                ..m
            }),
        }
    }

    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|m| m.name.as_str())
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.location.as_ref().map_or(0.0, |m| m.confidence)
    }

    #[must_use]
    pub fn location(&self) -> Option<&LocationMatch> {
        self.location.as_ref()
    }

    /// `true` when nothing at all could be extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.location.is_none()
    }
}

/// Flat wire shape of [`ExtractionResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExtractionRecord {
    date: Option<String>,
    time: Option<String>,
    location_name: Option<String>,
    #[serde(default)]
    confidence: f64,
}

impl From<ExtractionResult> for ExtractionRecord {
    fn from(result: ExtractionResult) -> Self {
        let confidence = result.confidence();
        Self {
            date: result.date,
            time: result.time,
            location_name: result.location.map(|m| m.name),
            confidence,
        }
    }
}

impl TryFrom<ExtractionRecord> for ExtractionResult {
    type Error = String;

    fn try_from(record: ExtractionRecord) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&record.confidence) {
            return Err(format!("confidence {} is outside [0, 1]", record.confidence));
        }
        let location = match record.location_name {
            Some(name) => Some(LocationMatch {
                name,
                confidence: record.confidence,
            }),
            None if record.confidence > 0.0 => {
                return Err("confidence must be 0 when location_name is absent".to_string());
            }
            None => None,
        };
        Ok(Self {
            date: record.date,
            time: record.time,
            location,
        })
    }
}

/// Payload handed to the incident-creation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDraft {
    pub incident_date: Option<String>,
    pub incident_time: Option<String>,
    pub location_id: i64,
    /// The extraction that produced this draft, kept for later review.
    pub email_data: Option<serde_json::Value>,
}

impl IncidentDraft {
    /// Combine an extraction with the location it resolved to.
    #[must_use]
    pub fn from_extraction(extraction: &ExtractionResult, location: &Location) -> Self {
        Self {
            incident_date: extraction.date.clone(),
            incident_time: extraction.time.clone(),
            location_id: location.id,
            email_data: serde_json::to_value(extraction).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hessental() -> Location {
        Location {
            id: 3,
            name: "Hessental".to_string(),
            city: "Schwäbisch Hall".to_string(),
            state: "Baden-Württemberg".to_string(),
            postal_code: Some("74523".to_string()),
            address: None,
        }
    }

    #[test]
    fn confidence_is_zero_without_location() {
        let result = ExtractionResult::new(Some("2025-02-09".to_string()), None, None);
        assert!(result.location_name().is_none());
        assert!(result.confidence().abs() < f64::EPSILON);
        assert!(!result.is_empty());
    }

    #[test]
    fn confidence_is_clamped() {
        let result = ExtractionResult::new(
            None,
            None,
            Some(LocationMatch {
                name: "Hessental".to_string(),
                confidence: 1.7,
            }),
        );
        assert!((result.confidence() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_result_is_empty() {
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn serializes_flat_shape() {
        let result = ExtractionResult::new(
            Some("2025-02-09".to_string()),
            Some("09:24".to_string()),
            Some(LocationMatch {
                name: "Hessental".to_string(),
                confidence: 0.95,
            }),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["date"], "2025-02-09");
        assert_eq!(value["time"], "09:24");
        assert_eq!(value["location_name"], "Hessental");
        assert_eq!(value["confidence"], 0.95);
    }

    #[test]
    fn deserialize_rejects_confidence_without_location() {
        let json = r#"{"date":null,"time":null,"location_name":null,"confidence":0.5}"#;
        let err = serde_json::from_str::<ExtractionResult>(json).unwrap_err();
        assert!(err.to_string().contains("location_name is absent"));
    }

    #[test]
    fn deserialize_accepts_partial_result() {
        let json = r#"{"date":"2025-02-09","time":null,"location_name":null}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.date.as_deref(), Some("2025-02-09"));
        assert!(result.location().is_none());
    }

    #[test]
    fn draft_copies_date_time_and_location_id() {
        let extraction = ExtractionResult::new(
            Some("2025-02-09".to_string()),
            None,
            Some(LocationMatch {
                name: "Hessental".to_string(),
                confidence: 0.9,
            }),
        );
        let draft = IncidentDraft::from_extraction(&extraction, &hessental());
        assert_eq!(draft.incident_date.as_deref(), Some("2025-02-09"));
        assert!(draft.incident_time.is_none());
        assert_eq!(draft.location_id, 3);
        let email_data = draft.email_data.expect("extraction serialized");
        assert_eq!(email_data["location_name"], "Hessental");
    }
}
