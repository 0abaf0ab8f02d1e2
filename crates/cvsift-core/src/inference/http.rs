use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    Classification, Classifier, EntityTagger, InferenceError, InferenceResult, TaggedSpan,
};
use crate::config::ConfigError;

fn parse_endpoint(endpoint: &str) -> crate::Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint(format!("{endpoint}: unsupported scheme")).into());
    }
    Ok(url)
}

fn post_json<B, R>(client: &Client, url: &Url, body: &B) -> InferenceResult<R>
where
    B: Serialize + ?Sized,
    R: for<'de> Deserialize<'de>,
{
    let response = client.post(url.clone()).json(body).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(InferenceError::Status(status));
    }
    response
        .json()
        .map_err(|e| InferenceError::Malformed(e.to_string()))
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

/// Zero-shot classifier served over HTTP by an inference server speaking the
/// `{"inputs", "parameters": {"candidate_labels"}}` protocol.
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
}

impl HttpClassifier {
    pub fn new(endpoint: &str) -> crate::Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().build().map_err(InferenceError::Request)?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, text: &str, labels: &[String]) -> InferenceResult<Classification> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
        };

        let classification: Classification = post_json(&self.client, &self.endpoint, &request)?;
        if classification.labels.len() != classification.scores.len() {
            return Err(InferenceError::Malformed(format!(
                "{} labels but {} scores",
                classification.labels.len(),
                classification.scores.len()
            )));
        }

        tracing::trace!(text, top = ?classification.top(), "Classified");
        Ok(classification)
    }
}

#[derive(Serialize)]
struct TaggingRequest<'a> {
    inputs: &'a str,
    parameters: TaggingParameters,
}

#[derive(Serialize)]
struct TaggingParameters {
    aggregation_strategy: &'static str,
}

#[derive(Deserialize)]
struct TaggedEntity {
    entity_group: String,
    word: String,
}

/// Token-classification model served over HTTP, aggregating sub-word tokens
/// into entity groups.
pub struct HttpEntityTagger {
    client: Client,
    endpoint: Url,
}

impl HttpEntityTagger {
    pub fn new(endpoint: &str) -> crate::Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().build().map_err(InferenceError::Request)?;
        Ok(Self { client, endpoint })
    }
}

impl EntityTagger for HttpEntityTagger {
    fn tag(&self, text: &str) -> InferenceResult<Vec<TaggedSpan>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let request = TaggingRequest {
            inputs: text,
            parameters: TaggingParameters {
                aggregation_strategy: "simple",
            },
        };

        let entities: Vec<TaggedEntity> = post_json(&self.client, &self.endpoint, &request)?;
        Ok(entities
            .into_iter()
            .map(|e| TaggedSpan::new(e.entity_group, e.word))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint("http://localhost:8080/zero-shot").is_ok());
        assert!(parse_endpoint("ftp://localhost/model").is_err());
        assert!(parse_endpoint("not a url").is_err());
    }

    #[test]
    fn test_zero_shot_request_shape() {
        let labels = vec!["job title".to_string(), "location".to_string()];
        let request = ZeroShotRequest {
            inputs: "Senior Engineer",
            parameters: ZeroShotParameters {
                candidate_labels: &labels,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "Senior Engineer");
        assert_eq!(json["parameters"]["candidate_labels"][1], "location");
    }

    #[test]
    fn test_classification_response_ignores_extra_fields() {
        let body = r#"{"sequence": "Acme", "labels": ["company name", "other"], "scores": [0.9, 0.1]}"#;
        let classification: Classification = serde_json::from_str(body).unwrap();
        assert_eq!(classification.top(), Some(("company name", 0.9)));
    }

    #[test]
    fn test_tagged_entity_response() {
        let body = r#"[{"entity_group": "PERSON", "score": 0.99, "word": "Jane Doe", "start": 0, "end": 8}]"#;
        let entities: Vec<TaggedEntity> = serde_json::from_str(body).unwrap();
        assert_eq!(entities[0].entity_group, "PERSON");
        assert_eq!(entities[0].word, "Jane Doe");
    }
}
