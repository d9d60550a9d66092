//! Result observer port
//!
//! Receives every accepted result as soon as the run accepts it, before the
//! run resolves. The flow adapter uses this to emit one event per result.

/// Observer of accepted results
pub trait ResultObserver<R>: Send + Sync {
    fn on_result(&self, result: &R);
}

/// Observer that ignores everything
pub struct NoResultObserver;

impl<R> ResultObserver<R> for NoResultObserver {
    fn on_result(&self, _result: &R) {}
}
