// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A reader/writer spinlock for the process-wide logger.

The wasm main thread may not block, so the global logger cannot sit behind a `Mutex`.
Readers (every log call) share the lock; writers (configuration changes) take it alone.
Hold it for as short a time as possible.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

const UNLOCKED: u8 = 0;
// up to 254 readers, or one writer (255)
const LOCKED_WRITE: u8 = u8::MAX;

pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicU8,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send + Sync> Sync for Spinlock<T> {}

/// Releases the lock when dropped, also during unwinding.
struct Unlock<'a> {
    locked: &'a AtomicU8,
    write: bool,
}

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        if self.write {
            self.locked.store(UNLOCKED, Release);
        } else {
            self.locked.fetch_sub(1, Release);
        }
    }
}

impl<T> Spinlock<T> {
    pub const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicU8::new(UNLOCKED),
        }
    }

    fn lock_write(&self) -> Unlock<'_> {
        while self
            .locked
            .compare_exchange_weak(UNLOCKED, LOCKED_WRITE, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        Unlock {
            locked: &self.locked,
            write: true,
        }
    }

    fn lock_read(&self) -> Unlock<'_> {
        while self
            .locked
            .fetch_update(Acquire, Relaxed, |v| {
                if v < (LOCKED_WRITE - 1) {
                    Some(v + 1)
                } else {
                    None
                }
            })
            .is_err()
        {
            std::hint::spin_loop();
        }
        Unlock {
            locked: &self.locked,
            write: false,
        }
    }

    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let _unlock = self.lock_write();
        // SAFETY: the write lock gives exclusive access
        unsafe { f(&mut *self.data.get()) }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let _unlock = self.lock_read();
        // SAFETY: the read lock excludes writers
        unsafe { f(&*self.data.get()) }
    }
}
