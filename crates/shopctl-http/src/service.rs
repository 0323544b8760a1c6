//! Small utilities for driving [`tower`] services

use tower::Service;

/// Swaps a ready service out for a fresh clone, returning the ready one.
///
/// A clone of a service is not guaranteed to be ready just because the
/// original is, so futures that outlive `call` must own the instance that
/// `poll_ready` was invoked on.
pub fn replace_ready_service<S, T>(src: &mut S) -> S
where
    S: Service<T> + Clone,
{
    let clone = src.clone();
    std::mem::replace(src, clone)
}
