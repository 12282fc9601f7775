// Audio channel layout labels as printed by ffprobe

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! channel_layouts {
    ($($variant:ident => $label:literal, $channels:literal;)+) => {
        /// Named channel layout from libavutil's channel layout table
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ChannelLayout {
            $($variant,)+
        }

        impl ChannelLayout {
            pub const ALL: &'static [ChannelLayout] = &[$(ChannelLayout::$variant,)+];

            /// Labels in table order
            pub const LABELS: &'static [&'static str] = &[$($label,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ChannelLayout::$variant => $label,)+
                }
            }

            pub fn channel_count(self) -> u32 {
                match self {
                    $(ChannelLayout::$variant => $channels,)+
                }
            }
        }
    };
}

channel_layouts! {
    Mono => "mono", 1;
    Stereo => "stereo", 2;
    Surround2_1 => "2.1", 3;
    Surround3_0 => "3.0", 3;
    Surround3_0Back => "3.0(back)", 3;
    Surround4_0 => "4.0", 4;
    Quad => "quad", 4;
    QuadSide => "quad(side)", 4;
    Surround3_1 => "3.1", 4;
    Surround5_0 => "5.0", 5;
    Surround5_0Side => "5.0(side)", 5;
    Surround4_1 => "4.1", 5;
    Surround5_1 => "5.1", 6;
    Surround5_1Side => "5.1(side)", 6;
    Surround6_0 => "6.0", 6;
    Surround6_0Front => "6.0(front)", 6;
    Surround3_1_2 => "3.1.2", 6;
    Hexagonal => "hexagonal", 6;
    Surround6_1 => "6.1", 7;
    Surround6_1Back => "6.1(back)", 7;
    Surround6_1Front => "6.1(front)", 7;
    Surround7_0 => "7.0", 7;
    Surround7_0Front => "7.0(front)", 7;
    Surround7_1 => "7.1", 8;
    Surround7_1Wide => "7.1(wide)", 8;
    Surround7_1WideSide => "7.1(wide-side)", 8;
    Surround5_1_2 => "5.1.2", 8;
    Surround5_1_2Back => "5.1.2(back)", 8;
    Octagonal => "octagonal", 8;
    Cube => "cube", 8;
    Surround5_1_4 => "5.1.4", 10;
    Surround7_1_2 => "7.1.2", 10;
    Surround7_1_4 => "7.1.4", 12;
    Surround7_2_3 => "7.2.3", 12;
    Surround9_1_4 => "9.1.4", 14;
    Surround9_1_6 => "9.1.6", 16;
    Hexadecagonal => "hexadecagonal", 16;
    Binaural => "binaural", 2;
    Downmix => "downmix", 2;
    Surround22_2 => "22.2", 24;
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label outside the channel layout table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel layout: {0}")]
pub struct UnknownChannelLayout(pub String);

impl FromStr for ChannelLayout {
    type Err = UnknownChannelLayout;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        ChannelLayout::ALL
            .iter()
            .copied()
            .find(|layout| layout.as_str() == label)
            .ok_or_else(|| UnknownChannelLayout(label.to_string()))
    }
}

impl Serialize for ChannelLayout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChannelLayout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        assert_eq!(ChannelLayout::ALL.len(), 40);
        assert_eq!(ChannelLayout::LABELS.len(), ChannelLayout::ALL.len());
        for (layout, label) in ChannelLayout::ALL.iter().zip(ChannelLayout::LABELS) {
            assert_eq!(layout.as_str(), *label);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("5.1".parse::<ChannelLayout>(), Ok(ChannelLayout::Surround5_1));
        assert_eq!(
            "7.1(wide-side)".parse::<ChannelLayout>(),
            Ok(ChannelLayout::Surround7_1WideSide)
        );
        assert!("13.1".parse::<ChannelLayout>().is_err());
        assert!("Stereo".parse::<ChannelLayout>().is_err());
    }

    #[test]
    fn test_channel_count() {
        assert_eq!(ChannelLayout::Mono.channel_count(), 1);
        assert_eq!(ChannelLayout::Surround7_1_4.channel_count(), 12);
        assert_eq!(ChannelLayout::Surround22_2.channel_count(), 24);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&ChannelLayout::Surround5_1Side).unwrap();
        assert_eq!(json, "\"5.1(side)\"");
        let back: ChannelLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChannelLayout::Surround5_1Side);
    }
}
