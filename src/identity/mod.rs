//! Ambient identity propagation for one logical request.
//!
//! Tools and memory operations need to know which user they act for
//! without every intermediate function threading a user id parameter.
//! [`IdentityContext`] is an explicit, request-scoped context object: the
//! orchestrator creates one per turn, sets the acting identity for the
//! duration of the call, and passes the context by reference into every
//! tool invocation and memory call.
//!
//! Because each logical request owns its own context, concurrent
//! interleaved requests cannot observe each other's identity. Within a
//! request, restoration is guaranteed by [`IdentityGuard`]'s `Drop` impl,
//! which runs on early return, `?`, and task cancellation alike.

use parking_lot::Mutex;

/// Request-scoped holder of the acting user's identity.
///
/// All operations are synchronous and non-suspending; the contract is
/// `set` / `get` / `restore`, with [`IdentityContext::scope`] as the
/// guard-based wrapper `handle_turn` uses.
#[derive(Debug, Default)]
pub struct IdentityContext {
    current: Mutex<Option<String>>,
}

/// Proof of a prior ambient state, consumed by [`IdentityContext::restore`].
///
/// Deliberately neither `Clone` nor `Copy`: each `set` is paired with at
/// most one `restore`.
#[derive(Debug)]
#[must_use = "dropping a RestoreToken without calling restore() leaks the identity into later operations on this context"]
pub struct RestoreToken {
    prior: Option<String>,
}

impl IdentityContext {
    /// Create an empty context. `get` returns `None` until `set` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish the ambient identity, returning the prior state.
    pub fn set(&self, identity: impl Into<String>) -> RestoreToken {
        let prior = self.current.lock().replace(identity.into());
        RestoreToken { prior }
    }

    /// Read the current ambient identity.
    ///
    /// Scoped operations must treat `None` as a hard precondition failure,
    /// never as an anonymous default.
    pub fn get(&self) -> Option<String> {
        self.current.lock().clone()
    }

    /// Unconditionally revert to the state captured by `token`.
    pub fn restore(&self, token: RestoreToken) {
        *self.current.lock() = token.prior;
    }

    /// Set the identity and return a guard that restores the prior state
    /// when dropped.
    pub fn scope(&self, identity: impl Into<String>) -> IdentityGuard<'_> {
        let token = self.set(identity);
        IdentityGuard {
            context: self,
            token: Some(token),
        }
    }
}

/// RAII restoration of an [`IdentityContext`].
///
/// The `Drop` impl is the `finally`-equivalent the propagation contract
/// requires: one request's identity can never bleed into whatever reuses
/// the context next, regardless of how the request ended.
#[derive(Debug)]
pub struct IdentityGuard<'a> {
    context: &'a IdentityContext,
    token: Option<RestoreToken>,
}

impl Drop for IdentityGuard<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.context.restore(token);
        }
    }
}
