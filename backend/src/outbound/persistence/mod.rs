//! Persistence adapters.

mod memory;

pub use memory::{
    MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository, MemoryUserDirectory,
};
