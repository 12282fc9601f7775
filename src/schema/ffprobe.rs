//! Descriptors for ffprobe's `-show_streams -show_format -of json` output
//!
//! Field names and enumeration values match ffprobe's JSON writer exactly.
//! Fields that only some codecs, containers or tool versions emit are
//! optional; everything else is required.

use once_cell::sync::Lazy;

use super::{ObjectSchema, Schema, TaggedUnion};
use crate::domain::model::{ChannelLayout, CodecType, Disposition};

/// Root descriptor, built once per process
pub static PROBE_OUTPUT: Lazy<Schema> = Lazy::new(probe_output);

/// Stream union descriptor, for validating stream records on their own
pub static STREAM: Lazy<Schema> = Lazy::new(|| stream().into());

/// `{ "streams": [...], "format": {...} }`
pub fn probe_output() -> Schema {
    ObjectSchema::strict("ProbeOutput")
        .required("streams", Schema::array(stream().into()))
        .required("format", format())
        .into()
}

pub fn disposition() -> ObjectSchema {
    Disposition::FLAGS
        .iter()
        .copied()
        .fold(ObjectSchema::strict("Disposition"), |schema, flag| {
            schema.required(flag, Schema::Integer)
        })
}

/// Three promoted keys; any other tag key is accepted with a string value
pub fn stream_tags() -> ObjectSchema {
    ObjectSchema::strict("StreamTags")
        .optional("language", Schema::String)
        .optional("handler_name", Schema::String)
        .optional("vendor_id", Schema::String)
        .catch_all(Schema::String)
}

pub fn video_side_data() -> ObjectSchema {
    ObjectSchema::strict("VideoSideData")
        .required("side_data_type", Schema::String)
        .optional("size", Schema::Integer)
        .catch_all(Schema::Any)
}

pub fn base_stream() -> ObjectSchema {
    ObjectSchema::strict("BaseStream")
        .required("index", Schema::Integer)
        .optional("codec_name", Schema::String)
        .optional("codec_long_name", Schema::String)
        .optional("profile", Schema::String)
        .optional("codec_tag_string", Schema::String)
        .required("codec_tag", Schema::String)
        .optional("id", Schema::String)
        .required("r_frame_rate", Schema::String)
        .required("avg_frame_rate", Schema::String)
        .required("time_base", Schema::String)
        .optional("start_pts", Schema::Integer)
        .optional("start_time", Schema::String)
        .optional("duration_ts", Schema::Integer)
        .optional("duration", Schema::String)
        .optional("bit_rate", Schema::String)
        .optional("max_bit_rate", Schema::String)
        .optional("bits_per_raw_sample", Schema::String)
        .optional("nb_frames", Schema::String)
        .optional("nb_read_frames", Schema::String)
        .optional("nb_read_packets", Schema::String)
        .optional("extradata_size", Schema::Integer)
        .required("disposition", disposition())
        .optional("tags", stream_tags())
}

fn tagged_stream(name: &'static str, codec_type: CodecType) -> ObjectSchema {
    base_stream()
        .extend(name)
        .required("codec_type", Schema::Literal(codec_type.as_str()))
}

pub fn video_stream() -> ObjectSchema {
    tagged_stream("VideoStream", CodecType::Video)
        .required("width", Schema::Integer)
        .required("height", Schema::Integer)
        .optional("coded_width", Schema::Integer)
        .optional("coded_height", Schema::Integer)
        .optional("closed_captions", Schema::Integer)
        .optional("film_grain", Schema::Integer)
        .required("has_b_frames", Schema::Integer)
        .optional("sample_aspect_ratio", Schema::String)
        .optional("display_aspect_ratio", Schema::String)
        .optional("pix_fmt", Schema::String)
        .required("level", Schema::Integer)
        .optional("color_range", Schema::String)
        .optional("color_space", Schema::String)
        .optional("color_transfer", Schema::String)
        .optional("color_primaries", Schema::String)
        .optional("chroma_location", Schema::String)
        .optional("field_order", Schema::String)
        .optional("refs", Schema::Integer)
        .optional("is_avc", Schema::String)
        .optional("nal_length_size", Schema::String)
        .optional("view_ids_available", Schema::String)
        .optional("view_pos_available", Schema::String)
        .optional("side_data_list", Schema::array(video_side_data().into()))
}

pub fn audio_stream() -> ObjectSchema {
    tagged_stream("AudioStream", CodecType::Audio)
        .required("sample_fmt", Schema::String)
        .required("sample_rate", Schema::String)
        .required("channels", Schema::Integer)
        .required("channel_layout", Schema::Enum(ChannelLayout::LABELS))
        .required("bits_per_sample", Schema::Integer)
        .required("initial_padding", Schema::Integer)
}

pub fn data_stream() -> ObjectSchema {
    tagged_stream("DataStream", CodecType::Data)
}

pub fn subtitle_stream() -> ObjectSchema {
    tagged_stream("SubtitleStream", CodecType::Subtitle)
        .optional("width", Schema::Integer)
        .optional("height", Schema::Integer)
}

/// Stream without a `codec_type` at all
pub fn unknown_stream() -> ObjectSchema {
    base_stream().extend("UnknownStream")
}

pub fn stream() -> TaggedUnion {
    TaggedUnion::new("Stream", "codec_type")
        .variant(CodecType::Video.as_str(), video_stream())
        .variant(CodecType::Audio.as_str(), audio_stream())
        .variant(CodecType::Data.as_str(), data_stream())
        .variant(CodecType::Subtitle.as_str(), subtitle_stream())
        .when_absent(unknown_stream())
}

pub fn format() -> ObjectSchema {
    ObjectSchema::strict("Format")
        .required("filename", Schema::String)
        .required("nb_streams", Schema::Integer)
        .required("nb_programs", Schema::Integer)
        .required("nb_stream_groups", Schema::Integer)
        .required("format_name", Schema::String)
        .required("format_long_name", Schema::String)
        .optional("start_time", Schema::String)
        .optional("duration", Schema::String)
        .required("size", Schema::String)
        .optional("bit_rate", Schema::String)
        .required("probe_score", Schema::Integer)
        .optional("tags", Schema::record(Schema::String))
}
