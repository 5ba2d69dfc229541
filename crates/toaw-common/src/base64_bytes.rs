//! Serialize byte spans as base64 strings.
//!
//! Works for both `Vec<u8>` and fixed-size `[u8; N]` fields; deserializing
//! into a fixed-size array fails when the decoded length differs.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(with = "toaw_common::base64_bytes")]
//!     name: [u8; 28],
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::{self, Deserialize, Deserializer};
use serde::Serializer;

pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]> + ?Sized,
{
    serializer.serialize_str(&STANDARD.encode(bytes.as_ref()))
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<Vec<u8>>,
{
    let encoded = String::deserialize(deserializer)?;
    let bytes = STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom)?;
    let len = bytes.len();
    T::try_from(bytes).map_err(|_| de::Error::invalid_length(len, &"a byte span of the recorded width"))
}

/// The same encoding for heap-allocated fixed-size spans.
pub mod boxed {
    use serde::{Deserializer, Serializer};

    #[allow(clippy::borrowed_box)]
    pub fn serialize<S, const N: usize>(
        bytes: &Box<[u8; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::serialize(&bytes[..], serializer)
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<Box<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Spans {
        #[serde(with = "super")]
        fixed: [u8; 4],
        #[serde(with = "super")]
        dynamic: Vec<u8>,
    }

    #[test]
    fn test_spans_as_base64() {
        let spans = Spans {
            fixed: *b"TOAC",
            dynamic: vec![0, 1, 2],
        };
        let json = serde_json::to_string(&spans).unwrap();
        assert_eq!(json, r#"{"fixed":"VE9BQw==","dynamic":"AAEC"}"#);
        assert_eq!(serde_json::from_str::<Spans>(&json).unwrap(), spans);
    }

    #[test]
    fn test_fixed_width_mismatch_is_rejected() {
        let json = r#"{"fixed":"AAEC","dynamic":""}"#;
        assert!(serde_json::from_str::<Spans>(json).is_err());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Message {
        #[serde(with = "super::boxed")]
        text: Box<[u8; 6]>,
    }

    #[test]
    fn test_boxed_span() {
        let message = Message {
            text: Box::new(*b"Draw\0\0"),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"text":"RHJhdwAA"}"#);
        assert_eq!(serde_json::from_str::<Message>(&json).unwrap(), message);

        assert!(serde_json::from_str::<Message>(r#"{"text":"RHJhdw=="}"#).is_err());
    }
}
