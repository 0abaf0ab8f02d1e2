pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fields;
pub mod inference;
pub mod location;
pub mod pipeline;
pub mod reader;
pub mod response;
pub mod segment;
pub mod text;

pub use config::{ConfigError, HeaderConfig, HeaderKeywordSet, ParserConfig, Resources, Settings};
pub use dates::{DateExtractor, DatePair, DateToken, MonthYear};
pub use error::{Error, Result};
pub use extract::{run_with_fallback, EducationExtractor, ExperienceExtractor, ExtractionContext};
pub use inference::{
    Classification, Classifier, EntityTagger, HttpClassifier, HttpEntityTagger, InferenceError,
    TaggedSpan,
};
pub use location::{City, CountryCodeLookup, CountryTable, GazetteerResolver, LocationResolver, Place};
pub use pipeline::ResumeParser;
pub use reader::{DocumentFormat, ReaderError};
pub use response::ResumeParsingResponse;
pub use segment::{SegmentName, Segmenter, Segments};
