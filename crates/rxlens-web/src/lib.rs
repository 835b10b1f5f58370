//! rxlens-web — Drug reviews dashboard over HTTP.
//! Provides:
//!   - the dashboard page (selectors, male/female 3-D charts, review panel)
//!   - JSON endpoints for options, charts, and session transitions
//!   - review panel fragments, batched or streamed over SSE

pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
