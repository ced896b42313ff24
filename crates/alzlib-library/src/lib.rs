//! Filesystem classification and processing for a single library member
//! (C4, C5).

pub mod classifier;
pub mod processor;
pub mod unmarshal;

pub use alzlib_core::MemoryFilesystem;
pub use classifier::{classify, is_under_cache_dir, FileKind};
pub use processor::{process, ProcessOutcome, ProcessResult};
