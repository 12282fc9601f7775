// Unit tests for the typed ffprobe model

use super::*;
use serde_json::json;

fn zero_disposition() -> Value {
    let flags: Map<String, Value> = Disposition::FLAGS
        .iter()
        .map(|flag| (flag.to_string(), json!(0)))
        .collect();
    Value::Object(flags)
}

fn audio_record() -> Value {
    json!({
        "index": 1,
        "codec_name": "aac",
        "codec_type": "audio",
        "codec_tag": "0x6134706d",
        "sample_fmt": "fltp",
        "sample_rate": "48000",
        "channels": 2,
        "channel_layout": "stereo",
        "bits_per_sample": 0,
        "initial_padding": 0,
        "r_frame_rate": "0/0",
        "avg_frame_rate": "0/0",
        "time_base": "1/48000",
        "disposition": zero_disposition(),
        "tags": {"language": "eng", "handler_name": "SoundHandler", "encoder": "Lavc"}
    })
}

#[test]
fn test_stream_dispatches_on_codec_type() {
    let stream: Stream = serde_json::from_value(audio_record()).unwrap();
    let Stream::Audio(audio) = &stream else {
        panic!("expected an audio stream, got {:?}", stream);
    };
    assert_eq!(audio.channel_layout, ChannelLayout::Stereo);
    assert_eq!(audio.sample_rate_hz(), Some(48_000));
    assert_eq!(stream.codec_type(), Some(CodecType::Audio));
    assert_eq!(stream.base().index, 1);
}

#[test]
fn test_stream_without_codec_type_is_unknown() {
    let mut record = audio_record();
    let map = record.as_object_mut().unwrap();
    for key in [
        "codec_type",
        "sample_fmt",
        "sample_rate",
        "channels",
        "channel_layout",
        "bits_per_sample",
        "initial_padding",
    ] {
        map.remove(key);
    }

    let stream: Stream = serde_json::from_value(record).unwrap();
    assert!(matches!(stream, Stream::Unknown(_)));
    assert_eq!(stream.codec_type(), None);
}

#[test]
fn test_serialized_stream_keeps_discriminator_and_skips_absent_fields() {
    let stream: Stream = serde_json::from_value(audio_record()).unwrap();
    let value = serde_json::to_value(&stream).unwrap();
    assert_eq!(value["codec_type"], "audio");
    assert!(value.get("codec_long_name").is_none());
    assert!(value.get("tags").unwrap().get("vendor_id").is_none());
    assert_eq!(value, audio_record());
}

#[test]
fn test_tags_split_known_and_extra_keys() {
    let stream: Stream = serde_json::from_value(audio_record()).unwrap();
    let tags = stream.base().tags.as_ref().unwrap();
    assert_eq!(tags.language.as_deref(), Some("eng"));
    assert_eq!(tags.get("handler_name"), Some("SoundHandler"));
    assert_eq!(tags.get("encoder"), Some("Lavc"));
    assert_eq!(tags.get("ENCODER"), None);
    assert_eq!(tags.extra.len(), 1);
}

#[test]
fn test_disposition_flags() {
    let mut disposition = Disposition::default();
    assert!(disposition.set_flags().is_empty());

    disposition.default = 1;
    disposition.attached_pic = 1;
    assert!(disposition.is_default());
    assert_eq!(disposition.set_flags(), vec!["default", "attached_pic"]);
    assert_eq!(disposition.get("attached_pic"), Some(1));
    assert_eq!(disposition.get("bogus"), None);
    assert_eq!(Disposition::FLAGS.len(), 19);
}

#[test]
fn test_side_data_keeps_unmodelled_fields() {
    let side_data: VideoSideData = serde_json::from_value(json!({
        "side_data_type": "Display Matrix",
        "displaymatrix": "\n00000000:            0       65536           0\n",
        "rotation": -90
    }))
    .unwrap();
    assert_eq!(side_data.side_data_type, "Display Matrix");
    assert_eq!(side_data.size, None);
    assert_eq!(side_data.extra["rotation"], json!(-90));
}

#[test]
fn test_codec_type_parse() {
    assert_eq!("subtitle".parse::<CodecType>(), Ok(CodecType::Subtitle));
    assert!("attachment".parse::<CodecType>().is_err());
    assert!("Video".parse::<CodecType>().is_err());
}

#[test]
fn test_format_helpers() {
    let format: Format = serde_json::from_value(json!({
        "filename": "x.mp4",
        "nb_streams": 1,
        "nb_programs": 0,
        "nb_stream_groups": 0,
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "format_long_name": "QuickTime / MOV",
        "duration": "12.500000",
        "size": "1024",
        "probe_score": 100
    }))
    .unwrap();
    assert_eq!(format.duration_seconds(), Some(12.5));
    assert_eq!(format.format_names().nth(1), Some("mp4"));
    assert!(format.tags.is_none());
}
