//! # Identity Resolver
//!
//! Pure extraction of `(organization, caller)` from the invocation context.

use crate::context::InvocationContext;

/// Resolve the caller's organization and caller id.
#[must_use]
pub fn resolve(ctx: &InvocationContext) -> (&str, &str) {
    let caller = ctx.caller();
    (caller.org_id.as_str(), caller.caller_id.as_str())
}
