use crate::response::{MetaData, REMARK_COMPLETE, REMARK_INCOMPLETE, STATUS_FAILURE, STATUS_SUCCESS};

/// Outcome of one parse, as reported in the response metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Complete,
    Incomplete,
}

impl ParseStatus {
    #[must_use]
    pub fn remark(&self) -> &'static str {
        match self {
            Self::Complete => REMARK_COMPLETE,
            Self::Incomplete => REMARK_INCOMPLETE,
        }
    }

    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Complete => STATUS_SUCCESS,
            Self::Incomplete => STATUS_FAILURE,
        }
    }
}

/// Language of `text` as an ISO 639-3 code and detection confidence.
/// Text too short or ambiguous to classify yields `None`.
#[must_use]
pub fn detect_language(text: &str) -> Option<(String, f64)> {
    let info = whatlang::detect(text)?;
    Some((info.lang().code().to_string(), info.confidence()))
}

/// Metadata with fresh random 16-bit job, resume and candidate keys and the
/// detected language of `text`.
#[must_use]
pub fn generate_metadata(status: ParseStatus, text: &str) -> MetaData {
    let (language_code, language_confidence) = detect_language(text).unwrap_or_else(|| {
        tracing::debug!("No language detected");
        (String::new(), 0.0)
    });

    MetaData {
        job_pk: u32::from(rand::random::<u16>()),
        remark: status.remark().to_string(),
        status: status.status().to_string(),
        resume_pk: u32::from(rand::random::<u16>()),
        candidate_pk: u32::from(rand::random::<u16>()),
        language_code,
        language_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "I am a software engineer with ten years of experience building \
        distributed systems and leading small teams across several companies.";
    const SPANISH: &str = "Soy ingeniero de datos con mucha experiencia en el desarrollo de \
        sistemas distribuidos para empresas de Madrid y Barcelona.";

    #[test]
    fn test_complete_metadata() {
        let metadata = generate_metadata(ParseStatus::Complete, ENGLISH);
        assert_eq!(metadata.remark, "Parsing Complete");
        assert_eq!(metadata.status, "succeeded");
        assert_eq!(metadata.language_code, "eng");
        assert!(metadata.language_confidence > 0.0);
        assert!(metadata.is_success());
        assert!(metadata.job_pk <= u32::from(u16::MAX));
    }

    #[test]
    fn test_detects_spanish() {
        let (code, confidence) = detect_language(SPANISH).unwrap();
        assert_eq!(code, "spa");
        assert!(confidence > 0.0 && confidence <= 1.0);
    }

    #[test]
    fn test_incomplete_metadata_has_no_language() {
        let metadata = generate_metadata(ParseStatus::Incomplete, "");
        assert_eq!(metadata.remark, "Parsing Uncomplete");
        assert_eq!(metadata.status, "unsucceeded");
        assert_eq!(metadata.language_code, "");
        assert!(metadata.language_confidence.abs() < f64::EPSILON);
    }
}
