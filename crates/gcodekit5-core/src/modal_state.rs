//! Persistent interpreter state carried across blocks.
//!
//! `ModalState` is an explicit, plain value — never ambient or global state —
//! passed by `&` to the checker and `&mut` to the execution engine, so
//! multiple interpreters can coexist in one process and tests can construct
//! arbitrary starting states cheaply.

use crate::params::Params;
use crate::taxonomy::{GCode, Plane};

/// Length units, selected by G20/G21.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// G21: millimeters.
    Millimeters,
    /// G20: inches.
    Inches,
}

/// Distance mode, selected by G90/G91.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// G90: axis words are absolute coordinates.
    Absolute,
    /// G91: axis words are deltas from the current position.
    Incremental,
}

/// Feed-rate interpretation, selected by G93/G94.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// G94: units-per-minute.
    UnitsPerMinute,
    /// G93: inverse-time (the move completes in `1/F` minutes).
    InverseTime,
}

/// Cutter-radius compensation state, selected by G40/G41/G42.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutterComp {
    /// G40: no compensation.
    Off,
    /// G41: compensate left of the programmed path, using the given tool slot.
    Left(u32),
    /// G42: compensate right of the programmed path, using the given tool slot.
    Right(u32),
}

impl CutterComp {
    /// True for [`CutterComp::Left`] or [`CutterComp::Right`].
    pub fn is_active(self) -> bool {
        !matches!(self, CutterComp::Off)
    }
}

/// Retract mode for canned cycles, selected by G98/G99.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetractMode {
    /// G98: retract to the position held before the first cycle.
    Previous,
    /// G99: retract only to the `R` plane.
    RPlane,
}

/// Path-control mode, selected by G61/G61.1/G64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathControl {
    /// G61: exact path, blending disallowed.
    ExactPath,
    /// G61.1: exact stop at every segment boundary.
    ExactStop,
    /// G64: continuous, blending allowed.
    Continuous,
}

/// Spindle state, selected by M3/M4/M5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpindleState {
    /// M5: stopped.
    Stopped,
    /// M3: running clockwise at the given speed.
    Clockwise(u32),
    /// M4: running counterclockwise at the given speed.
    CounterClockwise(u32),
}

/// Coolant state, selected by M7/M8/M9. Flood and mist may both be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoolantState {
    /// M8: flood coolant on.
    pub flood: bool,
    /// M7: mist coolant on.
    pub mist: bool,
}

/// Persistent, explicit interpreter state. Lives for the duration of one
/// program and is passed explicitly to the checker and engine — never
/// stored behind `Arc`/`Mutex`/thread-local/global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    /// Active plane (G17/G18/G19).
    pub plane: Plane,
    /// Active length units (G20/G21).
    pub units: Units,
    /// Active distance mode (G90/G91).
    pub distance: DistanceMode,
    /// Active feed-rate mode (G93/G94).
    pub feed_mode: FeedMode,
    /// Active cutter-radius compensation (G40/G41/G42).
    pub cutter_comp: CutterComp,
    /// Active tool-length compensation slot, or `None` if G49 is active.
    pub tool_length_comp: Option<u32>,
    /// Active canned-cycle retract mode (G98/G99).
    pub retract: RetractMode,
    /// Active path-control mode (G61/G61.1/G64).
    pub path_control: PathControl,
    /// Modal group 1 (motion): the code that applies when a block doesn't
    /// specify its own, and the reference used for canned-cycle
    /// first-invocation detection. `None` before any motion code has run.
    pub motion: Option<GCode>,
    /// Current feed rate (`F` word), persists across blocks.
    pub feed_rate: f64,
    /// Last commanded spindle speed (`S` word), persists across blocks so
    /// M3/M4 can restart at the last speed when re-issued without `S`.
    pub spindle_speed: f64,
    /// Current spindle state (M3/M4/M5).
    pub spindle: SpindleState,
    /// Current coolant state (M7/M8/M9).
    pub coolant: CoolantState,
    /// Feed/speed override enable (M48/M49).
    pub overrides_enabled: bool,
    /// Numbered parameters, addressable by name or by raw slot number.
    pub params: Params,
    /// The axis vector of the last block executed; the origin of the next
    /// incremental move.
    pub last_axis: [f64; 6],
}

impl Default for ModalState {
    fn default() -> Self {
        ModalState {
            plane: Plane::Xy,
            units: Units::Millimeters,
            distance: DistanceMode::Absolute,
            feed_mode: FeedMode::UnitsPerMinute,
            cutter_comp: CutterComp::Off,
            tool_length_comp: None,
            retract: RetractMode::Previous,
            path_control: PathControl::Continuous,
            motion: None,
            feed_rate: 0.0,
            spindle_speed: 0.0,
            spindle: SpindleState::Stopped,
            coolant: CoolantState::default(),
            overrides_enabled: true,
            params: Params::default(),
            last_axis: [0.0; 6],
        }
    }
}

impl ModalState {
    /// A fresh state with NIST/this-implementation defaults: G21 mm, XY
    /// plane, absolute distance, units-per-minute feed, CS1.
    pub fn new() -> Self {
        ModalState::default()
    }

    /// M30 semantics: full reset of modal groups and motion history.
    /// Numbered parameters that NIST designates as outliving a reset (home
    /// positions, tool table, G92 offsets) are preserved via `self.params`
    /// being left untouched except for the transient G92-enable flag, which
    /// NIST also resets.
    pub fn reset(&mut self) {
        let params = std::mem::take(&mut self.params);
        *self = ModalState::default();
        self.params = params;
        self.params.offset_on = false;
    }

    /// M2 semantics: end of program. NIST does not mandate that M2 reset
    /// modal state; it only stops execution. This implementation leaves
    /// `ModalState` untouched — the host is responsible for constructing a
    /// fresh `ModalState` for the next program if a full reset is desired.
    pub fn end_program(&self) {}

    /// True if the active feed mode is inverse-time.
    pub fn is_inverse_time(&self) -> bool {
        matches!(self.feed_mode, FeedMode::InverseTime)
    }

    /// True if the active distance mode is incremental.
    pub fn is_incremental(&self) -> bool {
        matches!(self.distance, DistanceMode::Incremental)
    }

    /// True if cutter-radius compensation is currently active.
    pub fn is_comp_active(&self) -> bool {
        self.cutter_comp.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_startup_state() {
        let s = ModalState::new();
        assert_eq!(s.units, Units::Millimeters);
        assert_eq!(s.plane, Plane::Xy);
        assert_eq!(s.distance, DistanceMode::Absolute);
        assert_eq!(s.params.cs_index, 1);
    }

    #[test]
    fn reset_clears_modal_groups_but_keeps_home_params() {
        let mut s = ModalState::new();
        s.units = Units::Inches;
        s.params.home = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0];
        s.params.offset_on = true;
        s.last_axis = [5.0; 6];
        s.reset();
        assert_eq!(s.units, Units::Millimeters);
        assert_eq!(s.params.home, [1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        assert!(!s.params.offset_on);
        assert_eq!(s.last_axis, [0.0; 6]);
    }

    #[test]
    fn reset_idempotence() {
        let mut s = ModalState::new();
        s.units = Units::Inches;
        s.reset();
        let once = s.clone();
        s.reset();
        assert_eq!(s, once);
    }

    #[test]
    fn end_program_does_not_mutate_state() {
        let s = ModalState::new();
        let before = s.clone();
        s.end_program();
        assert_eq!(s, before);
    }
}
