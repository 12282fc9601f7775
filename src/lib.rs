//! probeshape library
//!
//! Strict, typed validation of the JSON document printed by
//! `ffprobe -show_format -show_streams -of json`. Every object is closed
//! except stream tags, streams are a union discriminated on `codec_type`,
//! and a mismatch reports every offending field path at once.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod ports;
pub mod probe;
pub mod schema;
pub mod utils;
pub mod validate;

// Re-export commonly used types
pub use domain::model::{ProbeOutput, Stream};
pub use error::{ErrorKind, ProbeError, ProbeResult};
pub use probe::{parse_output, validate_value};
pub use validate::{ValidationError, Violation, ViolationKind};
