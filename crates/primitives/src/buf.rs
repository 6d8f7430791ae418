//! Small fixed-size byte newtypes.

use std::fmt;
use std::str::FromStr;

use hex::FromHexError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-byte buffer, used for commit hashes and other digests.
///
/// Displays and serializes as lowercase hex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Buf32([u8; 32]);

impl Buf32 {
    pub const LEN: usize = 32;

    pub const fn new(data: [u8; 32]) -> Self {
        Self(data)
    }

    pub const fn zero() -> Self {
        Self([0; 32])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Buf32 {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl From<Buf32> for [u8; 32] {
    fn from(value: Buf32) -> Self {
        value.0
    }
}

impl AsRef<[u8; 32]> for Buf32 {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Buf32 {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data = [0u8; 32];
        hex::decode_to_slice(s, &mut data)?;
        Ok(Self(data))
    }
}

impl Serialize for Buf32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Buf32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Buf32;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-character hex string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_display_roundtrips() {
        let buf = Buf32::new([0xab; 32]);
        let shown = buf.to_string();
        assert_eq!(shown.len(), 64);
        assert_eq!(shown.parse::<Buf32>().unwrap(), buf);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!("abcd".parse::<Buf32>().is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let buf = Buf32::new([0x01; 32]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{buf}\""));
        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
    }
}
