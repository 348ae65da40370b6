//! # State transition observer trait.
//!
//! Provides [`Observe`] an extension point for reacting to published transitions
//! (console banners, external notifications, metrics).
//!
//! Each observer gets:
//! - **Dedicated worker task** (runs independently of the engine)
//! - **Per-observer bounded queue** (capacity via [`Observe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Rules
//! - A slow observer only affects its own queue.
//! - Queue overflow drops the transition **for this observer only** and logs a warning.
//! - Transitions are processed sequentially (FIFO) per observer, in publication order.
//! - Observers never block the engine or each other.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use healthvisor::{Observe, Transition};
//!
//! struct Pager;
//!
//! #[async_trait]
//! impl Observe for Pager {
//!     async fn on_transition(&self, t: &Transition) {
//!         if t.left_ready() {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "pager" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Transition;

/// Observer of published readiness transitions.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single transition.
    ///
    /// Called from a dedicated worker task, never from the publishing thread.
    async fn on_transition(&self, transition: &Transition);

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// The runtime clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
