//! Parallel directory-tree search: walk one or more roots with a pool of
//! worker threads, print every entry whose basename matches a regex or glob
//! pattern, honouring per-repository gitignore rules.
//!
//! The traversal is a work-generating pipeline: each unit of work is one
//! directory, workers pull from a depth-prioritised queue (deeper first, an
//! approximation of depth-first order that keeps the backlog shallow), and
//! a pending-work counter detects global quiescence so shutdown sentinels
//! can be injected without ever racing live work.

mod config;
mod error;
mod filetype;
mod glob;
mod pending;
mod printer;
mod queue;
mod scanner;
mod scope;
mod walk;

pub use config::{MatchMode, OptionsBuilder, SearchOptions};
pub use error::SearchError;
pub use filetype::FileType;
pub use glob::{GlobError, glob_to_regex};
pub use pending::PendingCounter;
pub use printer::Printer;
pub use queue::{Priority, TaskQueue};
pub use scanner::Scanner;
pub use scope::{IgnoreScope, ScopeHandle};
pub use walk::{DirTask, walk_dir};

// this allocator is more efficient than jemalloc through my testing
#[cfg(all(
    feature = "mimalloc",
    any(target_os = "linux", target_os = "macos", target_os = "android")
))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
