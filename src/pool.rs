use std::{
    mem,
    ops::{Deref, DerefMut},
};

use crossbeam::queue::ArrayQueue;
use serde::{Serialize, de::DeserializeOwned};

use crate::{CopyBuffer, error::Result, options::CopyOptions};

/// Idle [`CopyBuffer`]s handed out one per concurrent caller.
///
/// A borrowed buffer goes back to the pool when its [`PooledBuffer`] is
/// dropped. When every buffer is out, [`get`](CopyBufferPool::get) builds a
/// new one; buffers returned to a full pool are dropped.
pub struct CopyBufferPool<T> {
    idle: ArrayQueue<CopyBuffer<T>>,
    options: CopyOptions,
}

impl<T> CopyBufferPool<T> {
    pub fn new(size: usize) -> Self {
        Self::with_options(size, CopyOptions::default())
    }

    pub fn with_options(size: usize, options: CopyOptions) -> Self {
        assert!(size > 0, "CopyBufferPool size must be greater than 0.");

        Self {
            idle: ArrayQueue::new(size),
            options,
        }
    }

    pub fn get(&self) -> PooledBuffer<'_, T> {
        let buffer = self.idle.pop().unwrap_or_else(|| {
            tracing::debug!("no idle copy buffer, build a new one");
            self.options.build()
        });
        PooledBuffer { pool: self, buffer }
    }

    /// Buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    /// Most buffers the pool keeps.
    pub fn size(&self) -> usize {
        self.idle.capacity()
    }
}

impl<T> CopyBufferPool<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn deep_copy(&self, source: &T) -> Result<T> {
        self.get().deep_copy(source)
    }
}

pub struct PooledBuffer<'a, T> {
    pool: &'a CopyBufferPool<T>,
    buffer: CopyBuffer<T>,
}

impl<T> Deref for PooledBuffer<'_, T> {
    type Target = CopyBuffer<T>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl<T> DerefMut for PooledBuffer<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl<T> Drop for PooledBuffer<'_, T> {
    fn drop(&mut self) {
        // an empty CopyBuffer does not allocate
        let buffer = mem::replace(&mut self.buffer, CopyBuffer::new());
        if self.pool.idle.push(buffer).is_err() {
            tracing::trace!("copy buffer pool full, drop buffer");
        }
    }
}
