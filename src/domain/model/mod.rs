// Domain models - Typed ffprobe output
//
// Values of these types are only ever built from documents that already
// passed schema validation, so every declared field can be read without
// further checks. Optional fields are skipped on serialization: absence
// and `null` are not the same thing to the schema.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod channel_layout;
#[cfg(test)]
mod tests;

pub use channel_layout::{ChannelLayout, UnknownChannelLayout};

/// Root of `ffprobe -show_streams -show_format -of json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutput {
    /// Streams in the tool's index order
    pub streams: Vec<Stream>,
    pub format: Format,
}

impl ProbeOutput {
    pub fn video_streams(&self) -> impl Iterator<Item = &VideoStream> {
        self.streams.iter().filter_map(|stream| match stream {
            Stream::Video(video) => Some(video),
            _ => None,
        })
    }

    pub fn audio_streams(&self) -> impl Iterator<Item = &AudioStream> {
        self.streams.iter().filter_map(|stream| match stream {
            Stream::Audio(audio) => Some(audio),
            _ => None,
        })
    }

    /// First video stream that is not an attached picture
    pub fn primary_video(&self) -> Option<&VideoStream> {
        self.video_streams()
            .find(|video| video.base.disposition.attached_pic == 0)
    }

    /// Stream with the given `index` field
    pub fn stream(&self, index: i64) -> Option<&Stream> {
        self.streams.iter().find(|stream| stream.base().index == index)
    }
}

/// Container-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub filename: String,
    pub nb_streams: i64,
    pub nb_programs: i64,
    pub nb_stream_groups: i64,
    pub format_name: String,
    pub format_long_name: String,
    /// Absent for containers without global timing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,
    pub probe_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl Format {
    /// Duration in seconds, when the container reports one
    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration.as_deref().and_then(|d| d.parse().ok())
    }

    /// Individual demuxer names from the comma separated `format_name`
    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.format_name.split(',')
    }
}

macro_rules! disposition_flags {
    ($($flag:ident),+ $(,)?) => {
        /// Stream role flags, each reported as 0 or 1
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct Disposition {
            $(pub $flag: i64,)+
        }

        impl Disposition {
            /// Flag names in the order ffprobe prints them
            pub const FLAGS: &'static [&'static str] = &[$(stringify!($flag),)+];

            pub fn get(&self, flag: &str) -> Option<i64> {
                match flag {
                    $(stringify!($flag) => Some(self.$flag),)+
                    _ => None,
                }
            }

            /// Names of the flags with a non-zero value
            pub fn set_flags(&self) -> Vec<&'static str> {
                let mut set = Vec::new();
                $(if self.$flag != 0 { set.push(stringify!($flag)); })+
                set
            }
        }
    };
}

disposition_flags!(
    default,
    dub,
    original,
    comment,
    lyrics,
    karaoke,
    forced,
    hearing_impaired,
    visual_impaired,
    clean_effects,
    attached_pic,
    timed_thumbnails,
    non_diegetic,
    captions,
    descriptions,
    metadata,
    dependent,
    still_image,
    multilayer,
);

impl Disposition {
    pub fn is_default(&self) -> bool {
        self.default != 0
    }
}

/// Stream tags: three well-known keys plus arbitrary encoder metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    /// Every other tag, keyed case-sensitively
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl StreamTags {
    /// Look a tag up by its exact key, known or not
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "language" => self.language.as_deref(),
            "handler_name" => self.handler_name.as_deref(),
            "vendor_id" => self.vendor_id.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }
}

/// Per-stream side data block; its shape depends on `side_data_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSideData {
    pub side_data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields shared by every stream variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStream {
    pub index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_long_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_tag_string: Option<String>,
    pub codec_tag: String,
    /// Transport stream PID, e.g. `0x100`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub r_frame_rate: String,
    pub avg_frame_rate: String,
    pub time_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bit_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits_per_raw_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_frames: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_read_frames: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_read_packets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extradata_size: Option<i64>,
    pub disposition: Disposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<StreamTags>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    #[serde(flatten)]
    pub base: BaseStream,
    pub width: i64,
    pub height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub film_grain: Option<i64>,
    pub has_b_frames: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_fmt: Option<String>,
    pub level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_transfer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_primaries: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chroma_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_avc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nal_length_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_ids_available: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_pos_available: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_data_list: Option<Vec<VideoSideData>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStream {
    #[serde(flatten)]
    pub base: BaseStream,
    pub sample_fmt: String,
    pub sample_rate: String,
    pub channels: i64,
    pub channel_layout: ChannelLayout,
    pub bits_per_sample: i64,
    pub initial_padding: i64,
}

impl AudioStream {
    pub fn sample_rate_hz(&self) -> Option<u32> {
        self.sample_rate.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStream {
    #[serde(flatten)]
    pub base: BaseStream,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleStream {
    #[serde(flatten)]
    pub base: BaseStream,
    /// Reported by bitmap subtitle codecs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

/// Stream reported without any `codec_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownStream {
    #[serde(flatten)]
    pub base: BaseStream,
}

/// Value of a stream's `codec_type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    Video,
    Audio,
    Data,
    Subtitle,
}

impl CodecType {
    pub const ALL: [CodecType; 4] = [
        CodecType::Video,
        CodecType::Audio,
        CodecType::Data,
        CodecType::Subtitle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CodecType::Video => "video",
            CodecType::Audio => "audio",
            CodecType::Data => "data",
            CodecType::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecType::ALL
            .into_iter()
            .find(|codec_type| codec_type.as_str() == s)
            .ok_or_else(|| format!("unrecognized codec_type: {}", s))
    }
}

/// One stream record, tagged by `codec_type`
#[derive(Debug, Clone, PartialEq)]
pub enum Stream {
    Video(VideoStream),
    Audio(AudioStream),
    Data(DataStream),
    Subtitle(SubtitleStream),
    /// `codec_type` was absent
    Unknown(UnknownStream),
}

impl Stream {
    pub fn base(&self) -> &BaseStream {
        match self {
            Stream::Video(stream) => &stream.base,
            Stream::Audio(stream) => &stream.base,
            Stream::Data(stream) => &stream.base,
            Stream::Subtitle(stream) => &stream.base,
            Stream::Unknown(stream) => &stream.base,
        }
    }

    pub fn codec_type(&self) -> Option<CodecType> {
        match self {
            Stream::Video(_) => Some(CodecType::Video),
            Stream::Audio(_) => Some(CodecType::Audio),
            Stream::Data(_) => Some(CodecType::Data),
            Stream::Subtitle(_) => Some(CodecType::Subtitle),
            Stream::Unknown(_) => None,
        }
    }
}

impl Serialize for Stream {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            codec_type: &'static str,
            #[serde(flatten)]
            stream: &'a T,
        }

        match self {
            Stream::Video(stream) => Tagged {
                codec_type: CodecType::Video.as_str(),
                stream,
            }
            .serialize(serializer),
            Stream::Audio(stream) => Tagged {
                codec_type: CodecType::Audio.as_str(),
                stream,
            }
            .serialize(serializer),
            Stream::Data(stream) => Tagged {
                codec_type: CodecType::Data.as_str(),
                stream,
            }
            .serialize(serializer),
            Stream::Subtitle(stream) => Tagged {
                codec_type: CodecType::Subtitle.as_str(),
                stream,
            }
            .serialize(serializer),
            Stream::Unknown(stream) => stream.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Stream {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut record = Map::<String, Value>::deserialize(deserializer)?;
        let codec_type = match record.remove("codec_type") {
            None => None,
            Some(Value::String(tag)) => Some(tag.parse::<CodecType>().map_err(de::Error::custom)?),
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "codec_type must be a string, found {}",
                    other
                )))
            }
        };

        let body = Value::Object(record);
        let stream = match codec_type {
            Some(CodecType::Video) => serde_json::from_value(body).map(Stream::Video),
            Some(CodecType::Audio) => serde_json::from_value(body).map(Stream::Audio),
            Some(CodecType::Data) => serde_json::from_value(body).map(Stream::Data),
            Some(CodecType::Subtitle) => serde_json::from_value(body).map(Stream::Subtitle),
            None => serde_json::from_value(body).map(Stream::Unknown),
        };
        stream.map_err(de::Error::custom)
    }
}
