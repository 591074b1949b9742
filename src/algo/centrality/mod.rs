//! Centrality algorithms for evolving graphs.
//!
//! # Overview
//!
//! | Algorithm | Question Answered | Complexity |
//! |-----------|-------------------|------------|
//! | Static Katz | Reachable via damped walks? | O(V³) |
//! | Aggregated Katz | Same, ignoring time | O(V³ + E) |
//! | Temporal Katz | Reachable via damped time-respecting walks? | O(T × V³) |
//!
//! # Choosing the Right Measure
//!
//! ```text
//! Want to find...                          Use...
//! ─────────────────────────────────────────────────────────
//! Influence in a snapshot                  katz_static
//! Influence if order didn't matter         katz_evolving
//! Who can spread information onward        katz_temporal (Broadcast)
//! Who is reached by the most information   katz_temporal (Receive)
//! ```
//!
//! # References
//!
//! - Katz (1953). "A new status index derived from sociometric analysis"
//! - Grindrod, Parsons, Higham, Estrada (2011). "Communicability across
//!   evolving networks"

mod katz;

pub use katz::{
    katz_evolving, katz_static, katz_temporal, CommunicabilityMatrix, KatzConfig, KatzMode,
    KatzScores, TemporalKatz, TemporalKatzConfig,
};
