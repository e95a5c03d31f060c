use crate::{CopyBuffer, CopyBufferPool, codec::BincodeCodec};

#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    initial_capacity: usize,

    size_limit: Option<u64>,

    retain_capacity: Option<usize>,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes allocated up front for the scratch buffer.
    pub fn initial_capacity(&mut self, capacity: usize) -> &mut Self {
        self.initial_capacity = capacity;
        self
    }

    /// Largest encoded value accepted, in bytes. Unlimited by default.
    pub fn size_limit(&mut self, limit: u64) -> &mut Self {
        self.size_limit = Some(limit);
        self
    }

    /// Once the scratch buffer grows past `capacity` bytes, its allocation is
    /// dropped at the end of the copy and replaced by a fresh one of
    /// `initial_capacity` bytes. Kept forever by default.
    pub fn retain_capacity(&mut self, capacity: usize) -> &mut Self {
        self.retain_capacity = Some(capacity);
        self
    }

    pub fn codec(&self) -> BincodeCodec {
        match self.size_limit {
            Some(limit) => BincodeCodec::with_limit(limit),
            None => BincodeCodec::new(),
        }
    }

    pub fn build<T>(&self) -> CopyBuffer<T> {
        CopyBuffer::from_parts(self.codec(), self.initial_capacity, self.retain_capacity)
    }

    pub fn build_pool<T>(&self, size: usize) -> CopyBufferPool<T> {
        CopyBufferPool::with_options(size, self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::CopyOptions;

    #[test]
    fn test_defaults() {
        let opts = CopyOptions::new();
        assert_eq!(opts.codec().limit(), None);

        let buffer = opts.build::<Vec<u8>>();
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.encoded_len(), 0);
    }

    #[test]
    fn test_builder() {
        let buffer = CopyOptions::new()
            .initial_capacity(128)
            .size_limit(1024)
            .build::<String>();

        assert!(buffer.capacity() >= 128);
        assert_eq!(buffer.codec().limit(), Some(1024));
    }
}
