//! Fixed-size worker pool for description generation.
//!
//! Workers are stateless and order-independent; each task yields an exit
//! status and the statuses are summed after an explicit join, so a non-zero
//! sum means at least one generation failed.

use crate::planner::error::PlanError;

/// Pool size is fixed; generation tasks are coarse and disk-bound.
pub const GENERATION_WORKERS: usize = 2;

/// One description-generation unit of work, yielding an exit status.
pub type GenerationTask = Box<dyn FnOnce() -> i32 + Send + 'static>;

/// Run all tasks on the pool and return the summed exit statuses.
/// Returns only after every worker has been joined.
pub fn run_generation_tasks(tasks: Vec<GenerationTask>) -> Result<i32, PlanError> {
    if tasks.is_empty() {
        return Ok(0);
    }

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<GenerationTask>();
    let (status_tx, status_rx) = crossbeam_channel::unbounded::<i32>();

    let task_count = tasks.len();
    for task in tasks {
        // Receiver outlives this loop; unbounded send cannot fail here.
        let _ = task_tx.send(task);
    }
    drop(task_tx);

    let mut workers = Vec::with_capacity(GENERATION_WORKERS);
    for index in 0..GENERATION_WORKERS {
        let task_rx = task_rx.clone();
        let status_tx = status_tx.clone();
        let handle = std::thread::Builder::new()
            .name(format!("camcert-plangen-worker-{index}"))
            .spawn(move || {
                for task in task_rx.iter() {
                    if status_tx.send(task()).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| PlanError::WorkerSpawn(e.to_string()))?;
        workers.push(handle);
    }
    drop(status_tx);

    let mut sum: i32 = 0;
    let mut reported = 0usize;
    for status in status_rx.iter() {
        sum = sum.saturating_add(status);
        reported += 1;
    }

    // Join barrier: plan composition must not start until generation is done.
    for worker in workers {
        if worker.join().is_err() {
            log::error!("generation worker panicked");
            sum = sum.saturating_add(1);
        }
    }

    // A panicked task never reports a status; count it as a failure even if
    // the join above already did.
    if reported < task_count {
        sum = sum.saturating_add((task_count - reported) as i32);
    }

    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_task_list_is_success() {
        assert_eq!(run_generation_tasks(Vec::new()).unwrap(), 0);
    }

    #[test]
    fn test_all_tasks_run_and_statuses_sum() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut tasks: Vec<GenerationTask> = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            tasks.push(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                0
            }));
        }
        assert_eq!(run_generation_tasks(tasks).unwrap(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_failures_aggregate_nonzero() {
        let tasks: Vec<GenerationTask> = vec![
            Box::new(|| 0),
            Box::new(|| 2),
            Box::new(|| 0),
            Box::new(|| 1),
        ];
        assert_eq!(run_generation_tasks(tasks).unwrap(), 3);
    }

    #[test]
    fn test_panicked_task_counts_as_failure() {
        let tasks: Vec<GenerationTask> = vec![Box::new(|| 0), Box::new(|| panic!("boom"))];
        assert!(run_generation_tasks(tasks).unwrap() > 0);
    }
}
