//! Scoped worker pool for per-table emission.
//!
//! Workers pull job indices from a shared counter and write each result into
//! its own slot, so the returned vector is in index order no matter which
//! thread ran which job.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;

/// Run `job(0..count)` on up to `workers` threads and return the results in
/// index order.
pub fn run_indexed<T, F>(count: usize, workers: usize, job: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let workers = workers.min(count);
    if workers <= 1 {
        return (0..count).map(job).collect();
    }

    let next = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<T>>> = (0..count).map(|_| Mutex::new(None)).collect();

    thread::scope(|scope| {
        for worker in 0..workers {
            let (next, slots, job) = (&next, &slots, &job);
            scope.spawn(move || {
                let mut done = 0usize;
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= count {
                        break;
                    }
                    *slots[index].lock() = Some(job(index));
                    done += 1;
                }
                tracing::trace!(worker, jobs = done, "emission worker finished");
            });
        }
    });

    slots
        .into_iter()
        .filter_map(Mutex::into_inner)
        .collect()
}
