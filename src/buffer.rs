use std::marker::PhantomData;

use bytes::BytesMut;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    codec::{BincodeCodec, Codec},
    error::Result,
};

/// Reusable scratch space for deep copies of `T`.
///
/// Every [`deep_copy`](CopyBuffer::deep_copy) clears the buffer, encodes the
/// source into it and decodes a new `T` back out. The allocation survives
/// between calls, so a long-lived buffer copies without reallocating once it
/// has grown to fit the largest value seen.
///
/// Copying takes `&mut self`: one buffer serves one caller at a time. Share
/// through [`SyncCopyBuffer`](crate::SyncCopyBuffer) or hand out buffers from
/// a [`CopyBufferPool`](crate::CopyBufferPool) when several threads copy
/// concurrently.
pub struct CopyBuffer<T, C = BincodeCodec> {
    buf: BytesMut,
    codec: C,
    encoded_len: usize,
    initial_capacity: usize,
    retain_capacity: Option<usize>,
    _marker: PhantomData<fn(&T) -> T>,
}

impl<T> CopyBuffer<T> {
    pub fn new() -> Self {
        Self::with_codec(BincodeCodec::new())
    }
}

impl<T> Default for CopyBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> CopyBuffer<T, C> {
    pub fn with_codec(codec: C) -> Self {
        Self::from_parts(codec, 0, None)
    }

    pub(crate) fn from_parts(
        codec: C,
        initial_capacity: usize,
        retain_capacity: Option<usize>,
    ) -> Self {
        Self {
            buf: BytesMut::with_capacity(initial_capacity),
            codec,
            encoded_len: 0,
            initial_capacity,
            retain_capacity,
            _marker: PhantomData,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Bytes produced by the most recent encode.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn release_capacity(&mut self) {
        if let Some(max) = self.retain_capacity
            && self.buf.capacity() > max
        {
            tracing::debug!(
                "release copy buffer, capacity: {}, retain: {}",
                self.buf.capacity(),
                max
            );
            self.buf = BytesMut::with_capacity(self.initial_capacity);
        }
    }
}

impl<T, C> CopyBuffer<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Returns a new `T` equal to `source` that shares no heap memory with
    /// it.
    pub fn deep_copy(&mut self, source: &T) -> Result<T> {
        self.buf.clear();
        let encoded = self.codec.encode(source, &mut self.buf);
        self.encoded_len = self.buf.len();

        let copy = match encoded {
            Ok(()) => {
                tracing::trace!("deep copy encoded {} bytes", self.encoded_len);
                self.codec.decode(&self.buf)
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &copy {
            tracing::debug!("deep copy failed: {}", e);
        }

        self.release_capacity();
        copy
    }
}

/// Copy `source` through a one-shot buffer.
pub fn deep_copy<T>(source: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    CopyBuffer::new().deep_copy(source)
}
