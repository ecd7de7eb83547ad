//! Phase timing for the log.

use std::time::Instant;

/// Logs how long a phase of a computation took once it goes out of scope.
///
/// ```
/// use vorowkt::Timed;
///
/// let cells = {
///     let _phase = Timed::debug("Cells");
///     vorowkt::compute_voronoi(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], 1.0)
/// };
/// assert!(cells.is_ok());
/// ```
///
/// On wasm32 there is no monotonic clock, so nothing is logged at the end.
pub struct Timed {
    phase: &'static str,
    level: log::Level,
    started: Option<Instant>,
}

impl Timed {
    /// Phase reported at INFO, announced at DEBUG.
    pub fn info(phase: &'static str) -> Self {
        Self::start(phase, log::Level::Info)
    }

    /// Phase reported at DEBUG, announced at TRACE.
    pub fn debug(phase: &'static str) -> Self {
        Self::start(phase, log::Level::Debug)
    }

    /// Name of the timed phase.
    pub fn phase(&self) -> &'static str {
        self.phase
    }

    fn start(phase: &'static str, level: log::Level) -> Self {
        let announce = match level {
            log::Level::Info => log::Level::Debug,
            _ => log::Level::Trace,
        };
        log::log!(announce, "{} started", phase);
        Self {
            phase,
            level,
            started: clock(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        if let Some(started) = self.started {
            log::log!(self.level, "{} finished in {:.3?}", self.phase, started.elapsed());
        }
    }
}

// `Instant::now` panics on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
fn clock() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn clock() -> Option<Instant> {
    None
}
