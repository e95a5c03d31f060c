use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    CopyBuffer,
    codec::{BincodeCodec, Codec},
    error::{Error, Result},
};

/// A [`CopyBuffer`] behind a lock, for callers that cannot hold `&mut`.
///
/// Copies are serialized: at most one runs at a time.
pub struct SyncCopyBuffer<T, C = BincodeCodec> {
    inner: Mutex<CopyBuffer<T, C>>,
}

impl<T> SyncCopyBuffer<T> {
    pub fn new() -> Self {
        Self::from(CopyBuffer::new())
    }
}

impl<T> Default for SyncCopyBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> From<CopyBuffer<T, C>> for SyncCopyBuffer<T, C> {
    fn from(buffer: CopyBuffer<T, C>) -> Self {
        Self {
            inner: Mutex::new(buffer),
        }
    }
}

impl<T, C> SyncCopyBuffer<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Waits for any copy in progress, then copies `source`.
    pub fn deep_copy(&self, source: &T) -> Result<T> {
        self.inner.lock().deep_copy(source)
    }

    /// Copies `source`, or fails with [`Error::Busy`] if another copy holds
    /// the buffer.
    pub fn try_deep_copy(&self, source: &T) -> Result<T> {
        match self.inner.try_lock() {
            Some(mut buffer) => buffer.deep_copy(source),
            None => {
                tracing::trace!("copy buffer contended");
                Err(Error::Busy)
            }
        }
    }
}

impl<T, C> SyncCopyBuffer<T, C> {
    pub fn into_inner(self) -> CopyBuffer<T, C> {
        self.inner.into_inner()
    }
}
