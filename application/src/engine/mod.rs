//! Collection engine
//!
//! One generic collector drives every kind of run. What differs between a
//! pairwise comparison, a per-statement reaction round, and free-text
//! collection is expressed as a [`CollectionPolicy`].
//!
//! # Run lifecycle
//!
//! ```text
//!             is_total_complete([])?
//!                 │ yes ───────────────────────────────▶ Resolved (timed_out = false)
//!                 │ no
//!                 ▼
//!   attach listeners, start timer, send intro
//!                 │
//!                 ▼
//!   ┌──────── Collecting ◀──────────────┐
//!   │             │ inbound message     │
//!   │             ▼                     │
//!   │   capped? ── yes ─▶ drop ─────────┤
//!   │   validate? ─ no ─▶ on_invalid ───┤
//!   │   convert, append, on_result      │
//!   │   personal complete? ─▶ on_personal_complete, cap
//!   │   total complete? ─ no ───────────┘
//!   │             │ yes
//!   │ timer       ▼
//!   └────────▶ Resolved ── detach listeners, drop timer
//! ```

mod collector;
mod error;
mod policy;
mod state;

pub use collector::CollectionEngine;
pub use error::CollectionError;
pub use policy::CollectionPolicy;
pub use state::{RunPhase, RunState};
