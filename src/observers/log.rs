//! # LogWriter: simple transition printer
//!
//! A minimal observer that prints every published [`Transition`] to stdout,
//! and the console "ready" banner when the system becomes ready.
//! Use it for demos or as a console notifier.
//!
//! ## Example output
//! ```text
//! [transition] seq=0 STARTING -> ACTIVE_NOT_READY "Required services not all started [svc-a]"
//! [transition] seq=1 ACTIVE_NOT_READY -> ACTIVE_READY "Application ready"
//! Application ready
//! ```

use async_trait::async_trait;

use crate::events::Transition;
use crate::observers::Observe;

/// Transition writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_transition(&self, t: &Transition) {
        println!(
            "[transition] seq={} {} -> {} {:?}",
            t.seq, t.from.state, t.to.state, t.to.short_desc
        );
        if t.became_ready() {
            println!("{}", t.to.short_desc);
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
