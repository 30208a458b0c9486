//=========================================================================
// Time
//=========================================================================
//
// Frame timing for the window loop.
//
// Architecture:
//   TimeSource (monotonic / manual)
//     ├─ Benchmark      → scoped wall-time measurement (phase statistics)
//     ├─ FrameLimiter   → blocking frame-rate cap + measured fps
//     └─ Clock          → delta time, frame history, smoothed fps readouts
//
//=========================================================================

//=== Module Declarations =================================================

mod bench;
mod clock;
mod limiter;
mod source;

//=== Public API ==========================================================

pub use bench::{bench_time, Benchmark};
pub use clock::{Clock, DEFAULT_HISTORY_LEN};
pub use limiter::FrameLimiter;
pub use source::{ManualTime, MonotonicTime, TimeSource};
