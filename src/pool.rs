//! Bounded worker pool for isolated-mode execution.
//!
//! Each job is a short-lived external process pair, so the pool is a
//! plain thread pool over a bounded channel: submission blocks once the
//! queue is full, which caps outstanding work (and with it open file
//! descriptors and memory) no matter how large the corpus is.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    sender: mpsc::SyncSender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// A pool of `workers` threads whose pending queue holds at most
    /// `backlog` jobs. `submit` blocks while the queue is full.
    pub fn new(workers: usize, backlog: usize) -> Self {
        let (sender, receiver) = mpsc::sync_channel::<Job>(backlog);
        let receiver = Arc::new(Mutex::new(receiver));
        let workers = (0..workers)
            .map(|_| {
                let receiver = Arc::clone(&receiver);
                std::thread::spawn(move || loop {
                    let job = {
                        let Ok(guard) = receiver.lock() else { break };
                        guard.recv()
                    };
                    match job {
                        Ok(job) => job(),
                        Err(_) => break, // queue closed, drain done
                    }
                })
            })
            .collect();
        WorkerPool { sender, workers }
    }

    /// Queue a job, blocking while `backlog` jobs are already pending.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) {
        if self.sender.send(Box::new(job)).is_err() {
            tracing::error!("worker pool is gone, job dropped");
        }
    }

    /// Close the queue and wait for every outstanding job to finish.
    pub fn join(self) {
        let WorkerPool { sender, workers } = self;
        drop(sender);
        for worker in workers {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_all_jobs_complete() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(4, 8);
        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.join();
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_submission_outpaces_slow_workers() {
        // more jobs than workers and backlog combined; submit must
        // block rather than drop
        let counter = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(2, 1);
        for _ in 0..32 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                std::thread::sleep(std::time::Duration::from_millis(1));
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.join();
        assert_eq!(counter.load(Ordering::SeqCst), 32);
    }
}
