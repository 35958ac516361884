use crate::config::SearchOptions;
use crate::pending::PendingCounter;
use crate::queue::TaskQueue;
use crate::scope::IgnoreScope;
use crate::walk::{DirTask, walk_dir};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/**
Coordinates one full search: seeds a task per root, spawns the worker pool,
waits for quiescence, shuts the workers down and flushes the printer.

Shutdown is deadlock-free by construction. The pending counter cannot reach
zero while any task is queued or being walked, because a walker takes a
credit *before* each child becomes visible in the queue. Shutdown sentinels
are enqueued only after the counter hits zero, and at the lowest priority,
so no worker can consume one while real work remains.
*/
pub struct Scanner {
    options: Arc<SearchOptions>,
    roots: Vec<PathBuf>,
}

impl Scanner {
    /// Roots default to the current directory when none are given.
    #[must_use]
    pub fn new(options: SearchOptions, roots: Vec<PathBuf>) -> Self {
        let roots = if roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            roots
        };
        Self {
            options: Arc::new(options),
            roots,
        }
    }

    /// Run the search to completion. Workers write matches as they go;
    /// per-directory filesystem errors are skipped silently.
    pub fn run(self) {
        let Self { options, roots } = self;

        let queue: Arc<TaskQueue<DirTask>> = Arc::new(TaskQueue::new());
        let pending = Arc::new(PendingCounter::new());
        let nthreads = options.threads.get();

        // Seeding credit: keeps the counter above zero until every root is
        // enqueued, so wait_idle cannot wake on a briefly empty pipeline.
        pending.acquire();

        let mut workers = Vec::with_capacity(nthreads);
        for _ in 0..nthreads {
            let queue = Arc::clone(&queue);
            let pending = Arc::clone(&pending);
            let options = Arc::clone(&options);
            workers.push(thread::spawn(move || {
                while let Some(task) = queue.get() {
                    walk_dir(&task, &options, &queue, &pending);
                    pending.release();
                }
            }));
        }

        for root in roots {
            pending.acquire();
            let scope = if options.no_ignore {
                None
            } else {
                IgnoreScope::open(&root)
            };
            queue.put_head(DirTask::new(0, root, scope));
        }
        pending.release();

        pending.wait_idle();
        for _ in 0..nthreads {
            queue.put_terminator();
        }
        for worker in workers {
            let _ = worker.join();
        }

        options.printer.flush();
    }
}
