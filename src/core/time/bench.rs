//=========================================================================
// Benchmark
//=========================================================================
//
// Scoped wall-time measurement used for the per-phase statistics.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::OnceLock;
use std::time::Instant;

//=== Process Origin ======================================================

static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Seconds since the first call in this process.
///
/// Only differences between two readings are meaningful.
pub fn bench_time() -> f64 {
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64()
}

//=== Benchmark ===========================================================

/// A running measurement started with [`Benchmark::start`].
///
/// ```
/// use stagehand::core::time::Benchmark;
///
/// let bench = Benchmark::start();
/// let seconds = bench.stop();
/// assert!(seconds >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Benchmark {
    start: Instant,
}

impl Benchmark {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Seconds elapsed since [`Benchmark::start`].
    pub fn stop(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
