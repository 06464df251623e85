//! Stack growth for deep expression trees.
//!
//! Issuing operand resolutions recurses once per tree level, and so does
//! polling the composed futures. The first goes through
//! [`ensure_sufficient_stack`], the second through [`GrowStack`], so that a
//! tall tree grows the stack instead of overflowing it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Polls the wrapped future under [`ensure_sufficient_stack`].
pub struct GrowStack<F>(pub F);

impl<F: Future + Unpin> Future for GrowStack<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.get_mut().0;
        ensure_sufficient_stack(|| Pin::new(inner).poll(cx))
    }
}
