use bincode::Options;
use bytes::{BufMut, BytesMut};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// Encoder/decoder pair used by a [`CopyBuffer`](crate::CopyBuffer).
///
/// `encode` appends to `buf`; the caller is responsible for clearing it.
/// Whatever `encode` produced for a value of `T` must be accepted by
/// `decode::<T>`.
pub trait Codec {
    fn encode<T>(&self, value: &T, buf: &mut BytesMut) -> Result<()>
    where
        T: Serialize + ?Sized;

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}

/// bincode with fixed-width little-endian integers.
///
/// Trailing bytes after a decoded value are rejected, so a `Serialize` impl
/// that writes more than its `Deserialize` impl reads is reported as a decode
/// failure instead of being silently accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec {
    limit: Option<u64>,
}

impl BincodeCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to encode or decode values larger than `limit` bytes.
    pub fn with_limit(limit: u64) -> Self {
        Self { limit: Some(limit) }
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
}

macro_rules! with_options {
    ($limit:expr, |$opts:ident| $body:expr) => {{
        let base = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_little_endian();
        match $limit {
            Some(limit) => {
                let $opts = base.with_limit(limit);
                $body
            }
            None => {
                let $opts = base.with_no_limit();
                $body
            }
        }
    }};
}

impl Codec for BincodeCodec {
    fn encode<T>(&self, value: &T, buf: &mut BytesMut) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        with_options!(self.limit, |opts| opts.serialize_into(buf.writer(), value))
            .map_err(|e| Error::Encode(e))
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        with_options!(self.limit, |opts| opts.deserialize(bytes)).map_err(|e| Error::Decode(e))
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use serde::{Deserialize, Serialize, Serializer};

    use super::{BincodeCodec, Codec};
    use crate::error::Error;

    #[test]
    fn test_fixint_little_endian_layout() -> anyhow::Result<()> {
        let mut buf = BytesMut::new();
        BincodeCodec::new().encode(&vec![1u32, 2u32], &mut buf)?;

        // u64 length prefix, then two u32s
        assert_eq!(
            &buf[..],
            &[2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0][..]
        );

        let decoded: Vec<u32> = BincodeCodec::new().decode(&buf)?;
        assert_eq!(decoded, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn test_encode_appends() -> anyhow::Result<()> {
        let codec = BincodeCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(&1u8, &mut buf)?;
        codec.encode(&2u8, &mut buf)?;
        assert_eq!(&buf[..], &[1, 2][..]);
        Ok(())
    }

    #[test]
    fn test_limit_exceeded() {
        let codec = BincodeCodec::with_limit(8);
        let mut buf = BytesMut::new();
        let err = codec.encode(&vec![0u64; 4], &mut buf).unwrap_err();
        assert!(matches!(err, Error::Encode(_)), "{err}");
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let err = BincodeCodec::new().decode::<u8>(&[1, 2]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err}");
    }

    #[test]
    fn test_short_input_rejected() {
        let err = BincodeCodec::new().decode::<u64>(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err}");
    }

    #[derive(Serialize, Deserialize)]
    struct Unsized {
        #[serde(serialize_with = "unknown_len")]
        items: Vec<u32>,
    }

    fn unknown_len<S: Serializer>(items: &[u32], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(items.iter().filter(|v| **v > 0))
    }

    #[test]
    fn test_sequence_without_length() {
        let value = Unsized {
            items: vec![1, 2, 3],
        };
        let mut buf = BytesMut::new();
        let err = BincodeCodec::new().encode(&value, &mut buf).unwrap_err();
        assert!(matches!(err, Error::Encode(_)), "{err}");
    }
}
