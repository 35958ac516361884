use crate::config::SearchOptions;
use crate::filetype::FileType;
use crate::pending::PendingCounter;
use crate::queue::TaskQueue;
use crate::scope::{IgnoreScope, ScopeHandle};
use std::fs;
use std::os::unix::ffi::OsStrExt as _;
use std::path::PathBuf;

/// One pending unit of traversal: a directory, its depth below the seeding
/// root, and the innermost ignore scope in effect for its entries.
///
/// Owned by the queue from enqueue to dequeue, then dropped by the worker
/// that expanded it; dropping releases its share of the ignore scope.
pub struct DirTask {
    pub depth: usize,
    pub path: PathBuf,
    pub scope: ScopeHandle,
}

impl DirTask {
    #[must_use]
    pub const fn new(depth: usize, path: PathBuf, scope: ScopeHandle) -> Self {
        Self { depth, path, scope }
    }
}

/// Hidden per the classic convention, plus editor backup files.
#[inline]
fn is_hidden(name: &[u8]) -> bool {
    name.first() == Some(&b'.') || name.last() == Some(&b'~')
}

/**
Expand a single directory: enumerate its entries, emit the ones that pass
every filter, and enqueue one child task per subdirectory.

Matches from this directory hit the printer before any of its children are
walked, since children only ever travel through the queue. Each child
enqueue is preceded by one [`PendingCounter::acquire`]; the caller releases
the credit for this task itself once `walk_dir` returns.
*/
pub fn walk_dir(
    task: &DirTask,
    options: &SearchOptions,
    queue: &TaskQueue<DirTask>,
    pending: &PendingCounter,
) {
    if options.max_depth.is_some_and(|limit| task.depth >= limit) {
        return;
    }

    // Unreadable directories (typically permission denied somewhere under
    // another user's tree) are skipped, not fatal.
    let Ok(entries) = fs::read_dir(&task.path) else {
        return;
    };

    if options.deterministic {
        let mut sorted: Vec<_> = entries.flatten().collect();
        sorted.sort_by_key(fs::DirEntry::file_name);
        for entry in &sorted {
            process_entry(entry, task, options, queue, pending);
        }
    } else {
        for entry in entries.flatten() {
            process_entry(&entry, task, options, queue, pending);
        }
    }
}

fn process_entry(
    entry: &fs::DirEntry,
    task: &DirTask,
    options: &SearchOptions,
    queue: &TaskQueue<DirTask>,
    pending: &PendingCounter,
) {
    let name = entry.file_name();
    let name_bytes = name.as_bytes();

    if options.skip_hidden && is_hidden(name_bytes) {
        return;
    }

    // d_type equivalent; std resolves DT_UNKNOWN with an lstat, and an
    // entry that still has no type is treated as a non-directory.
    let file_type = entry.file_type().map_or(FileType::Unknown, FileType::from);

    if !options.no_ignore
        && let Some(scope) = task.scope.as_deref()
        && scope.is_ignored(&name, file_type.is_dir())
    {
        return;
    }

    if options.matches(name_bytes) && options.accepts_type(file_type) {
        options
            .printer
            .emit(task.path.as_os_str().as_bytes(), name_bytes, file_type);
    }

    if file_type.is_dir() {
        // The credit must be taken before the child is visible in the
        // queue, otherwise the counter could hit zero with work in flight.
        pending.acquire();

        let child_path = task.path.join(&name);
        let scope = if options.no_ignore {
            None
        } else {
            // A child either starts its own scope or inherits the parent's.
            IgnoreScope::open(&child_path).or_else(|| task.scope.clone())
        };

        let depth = task.depth + 1;
        queue.put(DirTask::new(depth, child_path, scope), depth);
    }
}
