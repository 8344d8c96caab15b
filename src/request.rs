use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::{ContentType, Genre, Length, Mood};

/// One generation call's worth of user input. Every field is required; the
/// enum fields are already resolved against the closed sets, so a value that
/// deserializes is a valid combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub text: String,
    pub mood: Mood,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub genre: Genre,
    pub length: Length,
}

impl GenerationRequest {
    /// Build a request from raw labels, collecting every problem instead of
    /// stopping at the first. This is the boundary where unknown labels are
    /// rejected; nothing past here talks to a provider with a bad request.
    pub fn parse(
        text: &str,
        mood: &str,
        content_type: &str,
        genre: &str,
        length: &str,
    ) -> Result<Self, ValidationIssues> {
        let mut issues = Vec::new();

        if text.trim().is_empty() {
            issues.push(ValidationIssue::missing("text"));
        }
        let mood = check_label(mood, "mood", Mood::from_label, &Mood::ALL.map(Mood::as_str), &mut issues);
        let content_type = check_label(
            content_type,
            "type",
            ContentType::from_label,
            &ContentType::ALL.map(ContentType::as_str),
            &mut issues,
        );
        let genre = check_label(genre, "genre", Genre::from_label, &Genre::ALL.map(Genre::as_str), &mut issues);
        let length = check_label(length, "length", Length::from_label, &Length::ALL.map(Length::as_str), &mut issues);

        match (mood, content_type, genre, length) {
            (Some(mood), Some(content_type), Some(genre), Some(length)) if issues.is_empty() => {
                Ok(GenerationRequest {
                    text: text.to_string(),
                    mood,
                    content_type,
                    genre,
                    length,
                })
            }
            _ => Err(ValidationIssues(issues)),
        }
    }

    /// Typed-path validation. The enums are closed, so the only thing left to
    /// check is that the free-text instructions are actually there.
    pub fn validate(&self) -> Result<(), ValidationIssues> {
        if self.text.trim().is_empty() {
            return Err(ValidationIssues(vec![ValidationIssue::missing("text")]));
        }
        Ok(())
    }
}

fn check_label<T, const N: usize>(
    raw: &str,
    field: &'static str,
    resolve: fn(&str) -> Option<T>,
    valid: &[&'static str; N],
    issues: &mut Vec<ValidationIssue>,
) -> Option<T> {
    if raw.trim().is_empty() {
        issues.push(ValidationIssue::missing(field));
        return None;
    }
    match resolve(raw) {
        Some(value) => Some(value),
        None => {
            issues.push(ValidationIssue {
                field,
                message: format!("\"{raw}\" is not a recognized {field}"),
                suggestion: Some(format!("One of: {}", valid.join(", "))),
            });
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
            suggestion: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationIssues(pub Vec<ValidationIssue>);

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_labels() {
        let req = GenerationRequest::parse(
            "a lighthouse keeper who collects storms",
            "Reflective",
            "Short Story",
            "Fantasy",
            "Medium",
        )
        .unwrap();
        assert_eq!(req.mood, Mood::Reflective);
        assert_eq!(req.content_type, ContentType::ShortStory);
        assert_eq!(req.genre, Genre::Fantasy);
        assert_eq!(req.length, Length::Medium);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn parse_collects_every_issue() {
        let err = GenerationRequest::parse("", "Happy", "Recipe", "Fantasy", "Epic").unwrap_err();
        let fields: Vec<&str> = err.0.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["text", "type", "length"]);
        assert!(err.to_string().contains("\"Recipe\" is not a recognized type"));
    }

    #[test]
    fn parse_flags_missing_fields() {
        let err = GenerationRequest::parse("hello", "", "Poetry", "Drama", "  ").unwrap_err();
        let fields: Vec<&str> = err.0.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["mood", "length"]);
        assert!(err.to_string().contains("mood is required"));
    }

    #[test]
    fn unknown_label_suggests_the_closed_set() {
        let err = GenerationRequest::parse("hi", "Happy", "Novel", "Drama", "Long").unwrap_err();
        let suggestion = err.0[0].suggestion.as_deref().unwrap();
        assert!(suggestion.contains("Short Story"));
        assert!(suggestion.contains("Social Media Caption"));
    }

    #[test]
    fn validate_rejects_blank_text() {
        let mut req = GenerationRequest::parse("x", "Sad", "Quotes", "Satire", "Short").unwrap();
        req.text = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn wire_field_name_for_content_type_is_type() {
        let json = r#"{
            "text": "first snowfall over the harbor",
            "mood": "Hopeful",
            "type": "Poetry",
            "genre": "Romance",
            "length": "Very Short"
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.content_type, ContentType::Poetry);

        let out = serde_json::to_string(&req).unwrap();
        assert!(out.contains("\"type\":\"Poetry\""));
    }

    #[test]
    fn wire_rejects_unknown_enum_members() {
        let json = r#"{
            "text": "x",
            "mood": "Gloomy",
            "type": "Poetry",
            "genre": "Romance",
            "length": "Short"
        }"#;
        assert!(serde_json::from_str::<GenerationRequest>(json).is_err());
    }
}
