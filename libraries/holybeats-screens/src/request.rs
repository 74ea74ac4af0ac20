//! Last-request-wins bookkeeping
//!
//! Responses may resolve in any order. A screen records the parameters it
//! currently wants before each request and, when the response arrives,
//! keeps it only if those parameters are still the wanted ones.

/// Tracks the parameters of the newest request for one logical collection
#[derive(Debug, Clone)]
pub struct RequestGuard<P> {
    desired: Option<P>,
}

impl<P: Clone + PartialEq> RequestGuard<P> {
    pub fn new() -> Self {
        Self { desired: None }
    }

    /// Record `params` as the wanted request and return them for the caller
    pub fn issue(&mut self, params: P) -> P {
        self.desired = Some(params.clone());
        params
    }

    /// Whether a response for `params` still matches what is wanted
    pub fn is_current(&self, params: &P) -> bool {
        self.desired.as_ref() == Some(params)
    }

    pub fn desired(&self) -> Option<&P> {
        self.desired.as_ref()
    }

    /// Nothing is wanted any more; every in-flight response becomes stale
    pub fn clear(&mut self) {
        self.desired = None;
    }
}

impl<P: Clone + PartialEq> Default for RequestGuard<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut guard = RequestGuard::new();
        let all = guard.issue("all");
        let rock = guard.issue("rock");

        assert!(!guard.is_current(&all));
        assert!(guard.is_current(&rock));
    }

    #[test]
    fn cleared_guard_accepts_nothing() {
        let mut guard = RequestGuard::new();
        let id = guard.issue(7);
        guard.clear();
        assert!(!guard.is_current(&id));
        assert!(guard.desired().is_none());
    }
}
