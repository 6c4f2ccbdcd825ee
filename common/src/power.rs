//! Power-flow snapshot driving which arrows animate.

use crate::flow::FlowKind;

/// Instantaneous household power flow.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerFlow {
    /// Solar generation in watts.
    pub solar_w: u32,
    /// Grid power in watts: positive is import, negative is export.
    pub grid_w: i32,
    /// Immersion heater running on surplus.
    pub heating: bool,
}

impl PowerFlow {
    /// Create a snapshot.
    pub const fn new(
        solar_w: u32,
        grid_w: i32,
        heating: bool,
    ) -> Self {
        Self {
            solar_w,
            grid_w,
            heating,
        }
    }

    /// Whether the arrow for `kind` should run.
    ///
    /// Import and export are mutually exclusive; zero grid power runs neither.
    pub const fn is_active(
        &self,
        kind: FlowKind,
    ) -> bool {
        match kind {
            FlowKind::Solar => self.solar_w > 0,
            FlowKind::GridImport => self.grid_w > 0,
            FlowKind::GridExport => self.grid_w < 0,
            FlowKind::WaterHeating => self.heating,
        }
    }
}

// =============================================================================
// Demo Scenarios
// =============================================================================

/// A named power-flow snapshot for demos.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Short name shown in the log.
    pub name: &'static str,
    /// The snapshot.
    pub flow: PowerFlow,
}

/// Demo scenarios cycled by the firmware and bound to keys 1-4 in the simulator.
pub const DEMO_SCENARIOS: [Scenario; 4] = [
    Scenario {
        name: "Night",
        flow: PowerFlow::new(0, 850, false),
    },
    Scenario {
        name: "Morning",
        flow: PowerFlow::new(1_200, 300, false),
    },
    Scenario {
        name: "Midday export",
        flow: PowerFlow::new(3_600, -1_800, false),
    },
    Scenario {
        name: "Surplus heating",
        flow: PowerFlow::new(4_200, -400, true),
    },
];
