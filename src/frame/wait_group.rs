//! A small blocking wait-group used to synchronize the worker pool that
//! records secondary command buffers (§5 "A wait-group synchronizes the
//! pool for each render pass").

use std::sync::{Arc, Condvar, Mutex};

#[derive(Debug, Default)]
struct Inner {
    count: Mutex<usize>,
    condvar: Condvar,
}

/// Cloneable handle to a shared counter; `add` increments before handing
/// work to workers, each worker calls `done` on completion, and the owner
/// calls `wait` to block until the counter reaches zero.
#[derive(Debug, Clone)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl WaitGroup {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Arc::new(Inner::default()) }
    }

    pub fn add(&self, n: usize) {
        let mut count = self.inner.count.lock().unwrap();
        *count += n;
    }

    pub fn done(&self) {
        let mut count = self.inner.count.lock().unwrap();
        assert!(*count > 0, "wait group underflow");
        *count -= 1;
        if *count == 0 {
            self.inner.condvar.notify_all();
        }
    }

    pub fn wait(&self) {
        let mut count = self.inner.count.lock().unwrap();
        while *count > 0 {
            count = self.inner.condvar.wait(count).unwrap();
        }
    }
}
