// Inspect interactor - Orchestrates the probe, validate, render use case

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::model::{ProbeOutput, Stream};
use crate::error::{ProbeError, ProbeResult};
use crate::ports::ProbePort;
use crate::probe::parse_output;

/// Rendering of a validated probe result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Typed output re-serialized as JSON
    #[default]
    Json,
    Yaml,
    /// Human-readable summary
    Text,
}

/// Inspect request
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub input: PathBuf,
    pub format: OutputFormat,
}

/// Inspect response
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub output: ProbeOutput,
    pub rendered: String,
}

/// Interactor for media file inspection use case
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected probe port
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Probe, validate and render one file
    pub async fn execute(&self, request: InspectRequest) -> ProbeResult<InspectResponse> {
        let output = self.inspect(&request.input).await?;
        let rendered = render(&output, request.format)?;
        Ok(InspectResponse { output, rendered })
    }

    /// Probe and validate one file
    pub async fn inspect(&self, input: &std::path::Path) -> ProbeResult<ProbeOutput> {
        info!("Starting media file inspection for: {}", input.display());
        let text = self.probe_port.probe(input).await?;
        let output = parse_output(&text)?;
        info!(
            "Media file probed successfully: {} streams",
            output.streams.len()
        );
        Ok(output)
    }
}

/// Render typed output in the requested format
pub fn render(output: &ProbeOutput, format: OutputFormat) -> ProbeResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(output).map_err(|e| ProbeError::Render {
            message: format!("JSON serialization failed: {}", e),
        }),
        OutputFormat::Yaml => serde_yaml::to_string(output).map_err(|e| ProbeError::Render {
            message: format!("YAML serialization failed: {}", e),
        }),
        OutputFormat::Text => Ok(format_as_text(output)),
    }
}

fn format_as_text(output: &ProbeOutput) -> String {
    let format = &output.format;
    let mut text = String::new();

    text.push_str(&format!("File: {}\n", format.filename));
    text.push_str(&format!(
        "  Container: {} ({})\n",
        format.format_long_name, format.format_name
    ));
    match format.duration_seconds() {
        Some(duration) => text.push_str(&format!("  Duration: {:.3}s\n", duration)),
        None => text.push_str("  Duration: unknown\n"),
    }
    text.push_str(&format!("  Size: {} bytes\n", format.size));
    if let Some(bit_rate) = &format.bit_rate {
        text.push_str(&format!("  Bit Rate: {} bps\n", bit_rate));
    }
    text.push_str(&format!("  Streams: {}\n", output.streams.len()));

    for stream in &output.streams {
        let base = stream.base();
        let codec = base.codec_name.as_deref().unwrap_or("unknown");
        let detail = match stream {
            Stream::Video(video) => format!(
                "video {}x{} @ {} fps",
                video.width, video.height, base.avg_frame_rate
            ),
            Stream::Audio(audio) => format!(
                "audio {} Hz, {} ({} channels)",
                audio.sample_rate, audio.channel_layout, audio.channels
            ),
            Stream::Subtitle(_) => "subtitle".to_string(),
            Stream::Data(_) => "data".to_string(),
            Stream::Unknown(_) => "unknown".to_string(),
        };
        text.push_str(&format!("  #{} {}: {}", base.index, codec, detail));
        if let Some(language) = base.tags.as_ref().and_then(|tags| tags.language.as_deref()) {
            text.push_str(&format!(" [{}]", language));
        }
        let flags = base.disposition.set_flags();
        if !flags.is_empty() {
            text.push_str(&format!(" ({})", flags.join(", ")));
        }
        text.push('\n');
    }
    text
}
