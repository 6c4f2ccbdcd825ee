//! Demo power-flow sequencing for boards without a meter attached.
//!
//! The firmware's demo task walks through [`DEMO_SCENARIOS`], holding each one for
//! [`DEMO_HOLD_MS`], and publishes the snapshot to the render loop.

use monitor_common::power::{DEMO_SCENARIOS, Scenario};

/// How long each scenario stays on screen.
pub const DEMO_HOLD_MS: u32 = 15_000;

/// Endless cycle over the demo scenarios, starting with the first.
#[derive(Clone, Debug, Default)]
pub struct DemoCycle {
    index: usize,
}

impl DemoCycle {
    /// Start at the first scenario.
    pub const fn new() -> Self { Self { index: 0 } }
}

impl Iterator for DemoCycle {
    type Item = Scenario;

    fn next(&mut self) -> Option<Scenario> {
        let scenario = DEMO_SCENARIOS[self.index];
        self.index = (self.index + 1) % DEMO_SCENARIOS.len();
        Some(scenario)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
