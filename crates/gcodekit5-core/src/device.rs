//! The device sink: the capability surface the execution engine drives.
//!
//! This is an interface only — the physical (or simulated) controller
//! behind it is an external collaborator. The trait's method shapes follow
//! the actual call sites used by the execution pipeline this engine is
//! ported from, which disagree in places with that pipeline's own stale
//! header declarations (unified `spindle`/`tool`/`cutter`/`conf` calls
//! rather than one function per sub-concern) — see DESIGN.md Open
//! Question 9.

use crate::error::DeviceError;

/// A length/angle mode setting pushed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// G20/G21.
    Units,
    /// G17/G18/G19.
    Plane,
    /// G61/G61.1/G64.
    PathControl,
    /// G93/G94.
    FeedRateMode,
}

/// A numeric runtime configuration value pushed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conf {
    /// Feed rate, in the active feed mode's units.
    Rate,
    /// Spindle speed, in RPM.
    Speed,
}

/// Spindle rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpindleDir {
    /// M5.
    Stop,
    /// M3.
    Clockwise,
    /// M4.
    CounterClockwise,
}

/// A tool-table operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOp {
    /// T word: select a tool without changing it in the spindle.
    Select,
    /// M6: change to the selected tool.
    Change,
    /// G43: apply the tool's length compensation.
    Comp,
}

/// A cutter-radius compensation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutterOp {
    /// G40: compensation off.
    Center,
    /// G41: compensate left.
    Left,
    /// G42: compensate right.
    Right,
}

/// A binary option pushed to the device. Options are independent bits, not
/// a modal group: more than one may be on at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opt {
    /// G90/G91: true when the active distance mode is incremental.
    Relative,
    /// M48/M49: feed override enable.
    OverrideFeed,
    /// M48/M49: speed override enable.
    OverrideSpeed,
    /// G98/G99: true when canned cycles should retract to the previous
    /// height rather than only the `R` plane.
    RetractToPrevious,
}

/// A coolant channel. Flood and mist are independent bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coolant {
    /// M8.
    Flood,
    /// M7.
    Mist,
}

/// The capability surface the execution engine drives, one call per
/// canonical phase action. Every call returns [`DeviceError`] on failure;
/// the engine stops executing the remaining phases of the current block at
/// the first failure.
pub trait DeviceSink {
    /// Push a mode setting (units, plane, path control).
    fn mode(&mut self, mode: Mode, value: &str) -> Result<(), DeviceError>;

    /// Push a numeric configuration value (feed rate, spindle speed).
    fn conf(&mut self, conf: Conf, value: f64) -> Result<(), DeviceError>;

    /// Push the effective coordinate offset (active CS plus G92 offset).
    fn offset(&mut self, vec6: [f64; 6]) -> Result<(), DeviceError>;

    /// Free-space (rapid) motion, in either absolute or relative coordinates.
    fn move_to(&mut self, absolute: bool, vec6: [f64; 6]) -> Result<(), DeviceError>;

    /// Move to a stored home position. `index` 0 is G28's home, 1 is G30's
    /// secondary home.
    fn home(&mut self, index: u8) -> Result<(), DeviceError>;

    /// Linear (feed-rate) motion.
    fn line(&mut self, absolute: bool, vec6: [f64; 6]) -> Result<(), DeviceError>;

    /// Center-form arc: end point, center offsets (I,J,K; unused axes zero),
    /// and winding direction.
    fn carc(&mut self, end: [f64; 6], center_offsets: [f64; 3], cw: bool) -> Result<(), DeviceError>;

    /// Radius-form arc: end point, signed radius, and winding direction.
    fn rarc(&mut self, end: [f64; 6], radius: f64, cw: bool) -> Result<(), DeviceError>;

    /// Dwell for the given number of seconds.
    fn dwell(&mut self, seconds: f64) -> Result<(), DeviceError>;

    /// Probe toward the given target, stopping on contact.
    fn probe(&mut self, target: [f64; 6]) -> Result<(), DeviceError>;

    /// M0/M1: program stop. `optional` is true for M1.
    fn stop(&mut self, optional: bool) -> Result<(), DeviceError>;

    /// M3/M4/M5: spindle control.
    fn spindle(&mut self, dir: SpindleDir, speed: f64) -> Result<(), DeviceError>;

    /// T word / M6 / G43: tool-table operations.
    fn tool(&mut self, op: ToolOp, slot: i64) -> Result<(), DeviceError>;

    /// G40/G41/G42: cutter-radius compensation.
    fn cutter(&mut self, op: CutterOp, slot: i64) -> Result<(), DeviceError>;

    /// A developer comment with no machine-visible meaning.
    fn comment(&mut self, text: &str) -> Result<(), DeviceError>;

    /// A `MSG,`-prefixed, operator-visible message.
    fn message(&mut self, text: &str) -> Result<(), DeviceError>;

    /// A binary option toggle.
    fn opt(&mut self, option: Opt, on: bool) -> Result<(), DeviceError>;

    /// A coolant channel toggle.
    fn coolant(&mut self, channel: Coolant, on: bool) -> Result<(), DeviceError>;

    /// M2/M30: reset the device's internal program state.
    fn reset(&mut self) -> Result<(), DeviceError>;

    /// M30/M60: pallet shuttle exchange.
    fn pallet_shuttle(&mut self) -> Result<(), DeviceError>;
}
