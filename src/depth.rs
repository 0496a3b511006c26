// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call depth.
//!
//! The logger filters and decorates messages by how deeply nested the call site is. Where that
//! number comes from is a capability, [`DepthProvider`]:
//!
//! - [`ScopeDepth`] (the default) counts the scope frames currently open on this thread.
//!   Frames are opened with [`enter`] or with the [`#[scoped]`](crate::scoped) attribute.
//! - [`StackDepth`] (feature `backtrace`) counts raw stack frames.
//! - [`FixedDepth`] always reports the same number.
//! - [`NoDepth`] reports nothing; the depth check then always passes and depth displays as 0.
//!
//! ```rust
//! use scopelog::depth::{self, DepthProvider, ScopeDepth};
//!
//! assert_eq!(ScopeDepth.depth(), Some(0));
//! {
//!     let _outer = depth::enter();
//!     let _inner = depth::enter();
//!     assert_eq!(ScopeDepth.depth(), Some(2));
//! }
//! assert_eq!(ScopeDepth.depth(), Some(0));
//! ```

use std::cell::Cell;
use std::fmt::Debug;
use std::marker::PhantomData;

pub trait DepthProvider: Debug + Send + Sync {
    /// The current depth, or `None` when it cannot be determined.
    fn depth(&self) -> Option<usize>;
}

thread_local! {
    static OPEN_FRAMES: Cell<usize> = const { Cell::new(0) };
}

/**
An open scope frame. Dropping it closes the frame.

Frames count per thread, so the guard cannot be sent to another thread. Do not hold one
across an `.await`: other tasks polled on the same thread in the meantime would count it as
their own. `#[scoped]` refuses `async fn` for that reason.
*/
#[derive(Debug)]
#[must_use = "the frame closes as soon as the guard is dropped"]
pub struct Frame {
    _not_send: PhantomData<*const ()>,
}

/// Opens a scope frame on the current thread.
pub fn enter() -> Frame {
    OPEN_FRAMES.with(|n| n.set(n.get() + 1));
    Frame {
        _not_send: PhantomData,
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        OPEN_FRAMES.with(|n| n.set(n.get().saturating_sub(1)));
    }
}

/// Counts open [Frame]s on the calling thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScopeDepth;

impl DepthProvider for ScopeDepth {
    fn depth(&self) -> Option<usize> {
        Some(OPEN_FRAMES.with(Cell::get))
    }
}

/// Depth is unknown on this platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoDepth;

impl DepthProvider for NoDepth {
    fn depth(&self) -> Option<usize> {
        None
    }
}

/// A constant depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedDepth(pub usize);

impl DepthProvider for FixedDepth {
    fn depth(&self) -> Option<usize> {
        Some(self.0)
    }
}

/**
The number of frames on the native stack.

The count includes runtime startup and the logger's own frames; use
[Logger::set_strip_calls](crate::Logger::set_strip_calls) to discount them. Inlining makes the
number vary between debug and release builds.
*/
#[cfg(feature = "backtrace")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StackDepth;

#[cfg(feature = "backtrace")]
impl DepthProvider for StackDepth {
    fn depth(&self) -> Option<usize> {
        let mut frames = 0;
        backtrace::trace(|_| {
            frames += 1;
            true
        });
        Some(frames)
    }
}
