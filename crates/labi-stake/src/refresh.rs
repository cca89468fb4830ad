//! Recurring background reads.
//!
//! A [`Refresher`] runs a task on its own thread every interval and delivers
//! each result through a channel, so the interaction thread never waits on the
//! network. Results may be stale until the next tick. The returned
//! [`RefreshHandle`] stops the task on `cancel()` or drop.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

pub struct Refresher;

impl Refresher {
    /// Runs `task` immediately, then every `interval`, until cancelled or
    /// until the receiver is dropped.
    pub fn spawn<T, F>(interval: Duration, mut task: F) -> (RefreshHandle, Receiver<T>)
    where
        T: Send + 'static,
        F: FnMut() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let thread = thread::Builder::new()
            .name("labi-refresh".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    let value = task();
                    if flag.load(Ordering::Acquire) || sender.send(value).is_err() {
                        break;
                    }
                    thread::park_timeout(interval);
                }
            })
            .ok();

        (RefreshHandle { cancelled, thread }, receiver)
    }
}

pub struct RefreshHandle {
    cancelled: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            // the last session reference may be released on the refresh thread
            // itself; it cannot join itself
            if thread.thread().id() == thread::current().id() {
                return;
            }
            thread.thread().unpark();
            let _ = thread.join();
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn delivers_ticks_until_cancelled() {
        let (handle, receiver) = Refresher::spawn(Duration::from_millis(5), {
            let mut n = 0u32;
            move || {
                n += 1;
                n
            }
        });
        assert_eq!(receiver.recv().unwrap(), 1);
        assert_eq!(receiver.recv().unwrap(), 2);
        handle.cancel();
        // drain whatever was in flight, then the channel must close
        while receiver.recv_timeout(Duration::from_secs(1)).is_ok() {}
        assert!(receiver.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn cancel_does_not_wait_for_the_interval() {
        let (handle, receiver) = Refresher::spawn(Duration::from_secs(3_600), || ());
        receiver.recv().unwrap();
        let started = std::time::Instant::now();
        handle.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn dropping_the_receiver_stops_the_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let (handle, receiver) = Refresher::spawn(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        receiver.recv().unwrap();
        drop(receiver);
        thread::sleep(Duration::from_millis(50));
        let settled = runs.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(runs.load(Ordering::SeqCst), settled);
        drop(handle);
    }
}
