//! Model-backed collaborators: a zero-shot classifier and an entity tagger.
//!
//! Both are synchronous, blocking calls. A failure is never retried here; it
//! propagates to the caller and fails the whole document.

mod http;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::{HttpClassifier, HttpEntityTagger};

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Inference endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Malformed inference response: {0}")]
    Malformed(String),
    #[error("Model unavailable: {0}")]
    Unavailable(String),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Candidate labels ranked by descending score, with parallel scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Classification {
    /// Highest ranked label and its score.
    #[must_use]
    pub fn top(&self) -> Option<(&str, f64)> {
        Some((self.labels.first()?.as_str(), *self.scores.first()?))
    }
}

pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str, labels: &[String]) -> InferenceResult<Classification>;
}

/// Entity span returned by a tagger, e.g. (`PERSON`, `Jane Doe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub entity_type: String,
    pub text: String,
}

impl TaggedSpan {
    #[must_use]
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
        }
    }
}

pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> InferenceResult<Vec<TaggedSpan>>;
}

/// Classifies `text` and returns its top label.
pub fn classify_top(
    classifier: &dyn Classifier,
    text: &str,
    labels: &[String],
) -> InferenceResult<(String, f64)> {
    let classification = classifier.classify(text, labels)?;
    classification
        .top()
        .map(|(label, score)| (label.to_string(), score))
        .ok_or_else(|| InferenceError::Malformed(format!("no labels returned for {text:?}")))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_classification_top() {
        let classification = Classification {
            labels: vec!["job title".into(), "other".into()],
            scores: vec![0.8, 0.2],
        };
        assert_eq!(classification.top(), Some(("job title", 0.8)));
        assert_eq!(Classification::default().top(), None);
    }

    #[test]
    fn test_classify_top_rejects_empty_response() {
        struct Empty;
        impl Classifier for Empty {
            fn classify(&self, _: &str, _: &[String]) -> InferenceResult<Classification> {
                Ok(Classification::default())
            }
        }

        assert!(matches!(
            classify_top(&Empty, "Acme", &[]),
            Err(InferenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_scripted_classifier_ranks_answer_first() {
        let classifier = ScriptedClassifier::new(&[("Acme Corp", "company name", 0.91)]);
        let labels = vec!["job title".to_string(), "company name".to_string()];

        let top = classify_top(&classifier, "Acme Corp", &labels).unwrap();
        assert_eq!(top, ("company name".to_string(), 0.91));
        assert_eq!(classifier.calls(), 1);
    }
}
