//! Probe output parsing: raw JSON text to typed, schema-checked output

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::model::ProbeOutput;
use crate::error::{ProbeError, ProbeResult};
use crate::schema::ffprobe::PROBE_OUTPUT;
use crate::validate::{validate, ValidationError};

/// Parse and validate the stdout of `ffprobe -of json`.
///
/// Malformed text yields [`ProbeError::Syntax`]; well-formed JSON that does
/// not match the schema yields [`ProbeError::Schema`] with every violation.
pub fn parse_output(text: &str) -> ProbeResult<ProbeOutput> {
    let value: Value = serde_json::from_str(text)?;
    validate_value(value)
}

/// Validate an already parsed JSON document and convert it to typed output
pub fn validate_value(value: Value) -> ProbeResult<ProbeOutput> {
    if let Err(err) = validate(&value, &PROBE_OUTPUT) {
        warn!(violations = err.len(), "probe output rejected by schema");
        return Err(err.into());
    }

    let output: ProbeOutput = serde_json::from_value(value)
        .map_err(|err| ProbeError::Schema(ValidationError::conversion(&err)))?;
    debug!(
        streams = output.streams.len(),
        format = %output.format.format_name,
        "probe output validated"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn minimal_document() -> Value {
        json!({
            "streams": [],
            "format": {
                "filename": "empty.mkv",
                "nb_streams": 0,
                "nb_programs": 0,
                "nb_stream_groups": 0,
                "format_name": "matroska,webm",
                "format_long_name": "Matroska / WebM",
                "size": "512",
                "probe_score": 100
            }
        })
    }

    #[test]
    fn test_minimal_document() {
        let output = validate_value(minimal_document()).unwrap();
        assert!(output.streams.is_empty());
        assert_eq!(output.format.duration, None);
    }

    #[test]
    fn test_malformed_text_is_syntax_error() {
        let err = parse_output("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_empty_text_is_syntax_error() {
        assert_eq!(parse_output("").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_unknown_top_level_key() {
        let mut doc = minimal_document();
        doc["chapters"] = json!([]);
        let err = validate_value(doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path.to_string(), "chapters");
    }
}
