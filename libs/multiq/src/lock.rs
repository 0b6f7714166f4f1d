use std::sync::atomic::{
    AtomicBool,
    Ordering::{Acquire, Relaxed, Release},
};

/// Binary try-lock: no waiters, no fairness, no re-entrancy.
#[derive(Debug, Default)]
pub(crate) struct TryLock {
    held: AtomicBool,
}

impl TryLock {
    pub(crate) const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Flips the lock from free to held. Never blocks.
    pub(crate) fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Acquire, Relaxed)
            .is_ok()
    }

    pub(crate) fn release(&self) {
        self.held.store(false, Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::UnsafeCell;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn acquire_release_cycle() {
        let lock = TryLock::new();
        assert!(lock.try_acquire());
        // held locks are not re-entrant
        assert!(!lock.try_acquire());
        lock.release();
        assert!(lock.try_acquire());
        lock.release();
    }

    struct Guarded {
        lock: TryLock,
        counter: UnsafeCell<u64>,
    }

    unsafe impl Sync for Guarded {}

    #[test]
    fn no_lost_updates_under_contention() {
        const THREADS: u64 = 8;
        const INCREMENTS: u64 = 10_000;

        let guarded = Arc::new(Guarded {
            lock: TryLock::new(),
            counter: UnsafeCell::new(0),
        });

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let guarded = Arc::clone(&guarded);
                thread::spawn(move || {
                    for _ in 0..INCREMENTS {
                        while !guarded.lock.try_acquire() {
                            std::hint::spin_loop();
                        }
                        unsafe { *guarded.counter.get() += 1 };
                        guarded.lock.release();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(unsafe { *guarded.counter.get() }, THREADS * INCREMENTS);
    }
}
