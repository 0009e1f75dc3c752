//! Limits applied to every route by the router.

use std::time::Duration;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest JSON body accepted. Requests carry a handful of short fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;
