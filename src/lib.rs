//! Deep copies of in-memory values by round-tripping them through a binary
//! codec.
//!
//! ```
//! use deepcopy::CopyBuffer;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Record {
//!     data: Vec<String>,
//! }
//!
//! let orig = Record {
//!     data: vec!["a".into(), "b".into(), "c".into()],
//! };
//! let mut buffer = CopyBuffer::<Record>::new();
//! let copy = buffer.deep_copy(&orig).unwrap();
//! assert_eq!(orig, copy);
//! ```

mod buffer;
mod pool;
mod shared;

pub mod codec;
pub mod error;
pub mod options;

#[cfg(test)]
mod test_utils;

pub use buffer::{CopyBuffer, deep_copy};
pub use pool::{CopyBufferPool, PooledBuffer};
pub use shared::SyncCopyBuffer;
