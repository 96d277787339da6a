//! The execution ordering engine: translates a checked [`Block`] into
//! device calls in the fixed 21-phase canonical order mandated by RS274.
//!
//! Each phase is one function below, called in sequence by [`execute`]. A
//! device failure at any phase stops the remaining phases of the block
//! (the `?` operator gives this short-circuit for free) — matching the
//! single-threaded, strictly-sequential model the rest of this core uses.

use crate::block::Block;
use crate::device::{Conf, Coolant, CutterOp, DeviceSink, Mode, Opt, SpindleDir, ToolOp};
use crate::error::DeviceError;
use crate::modal_state::{CutterComp, DistanceMode, FeedMode, ModalState, PathControl, RetractMode, SpindleState};
use crate::taxonomy::{GCode, Letter, MCode, ModalGroup, Plane};

const AXIS_LETTERS: [Letter; 6] = [Letter::X, Letter::Y, Letter::Z, Letter::A, Letter::B, Letter::C];

/// The resolved axis vector this block targets: present letters use their
/// value unconditionally; absent letters are zero in incremental mode and
/// carry the prior position forward in absolute mode.
fn resolved_axis(block: &Block, modal: &ModalState) -> [f64; 6] {
    let mut out = [0.0; 6];
    for (i, &letter) in AXIS_LETTERS.iter().enumerate() {
        out[i] = if block.has(letter) {
            block.word(letter)
        } else if modal.is_incremental() {
            0.0
        } else {
            modal.last_axis[i]
        };
    }
    out
}

/// The raw per-letter values this block carries for the six axes, `0.0`
/// where absent — what a device expects when told to interpret a move as
/// relative deltas rather than an absolute target.
fn raw_axis(block: &Block) -> [f64; 6] {
    let mut out = [0.0; 6];
    for (i, &letter) in AXIS_LETTERS.iter().enumerate() {
        out[i] = block.word(letter);
    }
    out
}

fn cs_index_for(code: GCode) -> u32 {
    use GCode::*;
    match code {
        G54 => 1,
        G55 => 2,
        G56 => 3,
        G57 => 4,
        G58 => 5,
        G59 => 6,
        G59_1 => 7,
        G59_2 => 8,
        G59_3 => 9,
        _ => unreachable!("cs_index_for called with a non-coordinate-system code"),
    }
}

fn phase1_comment(block: &Block, device: &mut dyn DeviceSink) -> Result<(), DeviceError> {
    match block.comment_kind() {
        Some(crate::block::CommentKind::Message) => {
            device.message(block.message_text().unwrap_or_default())
        }
        Some(crate::block::CommentKind::Plain) => {
            device.comment(block.comment.as_deref().unwrap_or_default())
        }
        None => Ok(()),
    }
}

fn phase2_feed_mode(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::FeedMode) {
        modal.feed_mode = match code {
            GCode::G93 => FeedMode::InverseTime,
            GCode::G94 => FeedMode::UnitsPerMinute,
            _ => unreachable!(),
        };
        let name = match modal.feed_mode {
            FeedMode::InverseTime => "INVERSE_TIME",
            FeedMode::UnitsPerMinute => "UNITS_PER_MINUTE",
        };
        device.mode(Mode::FeedRateMode, name)?;
    }
    Ok(())
}

fn phase3_feed_rate(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if block.has(Letter::F) {
        modal.feed_rate = block.word(Letter::F);
        device.conf(Conf::Rate, modal.feed_rate)?;
    }
    Ok(())
}

fn phase4_spindle_speed(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if block.has(Letter::S) {
        modal.spindle_speed = block.word(Letter::S);
        device.conf(Conf::Speed, modal.spindle_speed)?;
    }
    Ok(())
}

fn phase5_tool_select(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if block.has(Letter::T) {
        modal.params.tool = block.word(Letter::T) as u32;
        device.tool(ToolOp::Select, modal.params.tool as i64)?;
    }
    Ok(())
}

fn phase6_tool_change(
    block: &Block,
    modal: &ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if block.has_mcode(MCode::M6) {
        device.tool(ToolOp::Change, modal.params.tool as i64)?;
    }
    Ok(())
}

fn phase7_spindle(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    let Some(code) = block.mcode_in(ModalGroup::MSpindle) else {
        return Ok(());
    };
    let speed = if block.has(Letter::S) {
        block.word(Letter::S)
    } else {
        modal.spindle_speed
    };
    match code {
        MCode::M3 => {
            modal.spindle = SpindleState::Clockwise(speed as u32);
            device.spindle(SpindleDir::Clockwise, speed)?;
        }
        MCode::M4 => {
            modal.spindle = SpindleState::CounterClockwise(speed as u32);
            device.spindle(SpindleDir::CounterClockwise, speed)?;
        }
        MCode::M5 => {
            modal.spindle = SpindleState::Stopped;
            device.spindle(SpindleDir::Stop, 0.0)?;
        }
        _ => unreachable!(),
    }
    Ok(())
}

fn phase8_coolant(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if block.has_mcode(MCode::M9) {
        modal.coolant = Default::default();
        device.coolant(Coolant::Flood, false)?;
        device.coolant(Coolant::Mist, false)?;
        return Ok(());
    }
    if block.has_mcode(MCode::M7) {
        modal.coolant.mist = true;
        device.coolant(Coolant::Mist, true)?;
    }
    if block.has_mcode(MCode::M8) {
        modal.coolant.flood = true;
        device.coolant(Coolant::Flood, true)?;
    }
    Ok(())
}

fn phase9_overrides(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.mcode_in(ModalGroup::MOverride) {
        modal.overrides_enabled = code == MCode::M48;
        device.opt(Opt::OverrideFeed, modal.overrides_enabled)?;
        device.opt(Opt::OverrideSpeed, modal.overrides_enabled)?;
    }
    Ok(())
}

fn phase10_dwell(block: &Block, device: &mut dyn DeviceSink) -> Result<(), DeviceError> {
    if block.gcode_in(ModalGroup::NonModal) == Some(GCode::G4) {
        device.dwell(block.word(Letter::P))?;
    }
    Ok(())
}

fn phase11_plane(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::Plane) {
        modal.plane = match code {
            GCode::G17 => Plane::Xy,
            GCode::G18 => Plane::Xz,
            GCode::G19 => Plane::Yz,
            _ => unreachable!(),
        };
        device.mode(Mode::Plane, &modal.plane.to_string())?;
    }
    Ok(())
}

fn phase12_units(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::Units) {
        modal.units = match code {
            GCode::G20 => crate::modal_state::Units::Inches,
            GCode::G21 => crate::modal_state::Units::Millimeters,
            _ => unreachable!(),
        };
        let name = match modal.units {
            crate::modal_state::Units::Inches => "INCHES",
            crate::modal_state::Units::Millimeters => "MILLIMETERS",
        };
        device.mode(Mode::Units, name)?;
    }
    Ok(())
}

fn phase13_cutter_comp(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::CutterComp) {
        match code {
            GCode::G40 => {
                modal.cutter_comp = CutterComp::Off;
                device.cutter(CutterOp::Center, 0)?;
            }
            GCode::G41 => {
                let slot = if block.has(Letter::D) { block.word(Letter::D) as u32 } else { 0 };
                modal.cutter_comp = CutterComp::Left(slot);
                device.cutter(CutterOp::Left, slot as i64)?;
            }
            GCode::G42 => {
                let slot = if block.has(Letter::D) { block.word(Letter::D) as u32 } else { 0 };
                modal.cutter_comp = CutterComp::Right(slot);
                device.cutter(CutterOp::Right, slot as i64)?;
            }
            _ => unreachable!(),
        }
    }
    Ok(())
}

fn phase14_tool_length_comp(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::ToolLengthComp) {
        match code {
            GCode::G43 => {
                // H absent or H0 both mean "use the currently selected
                // tool's offset" (EMC2 convention, not strict NIST).
                let slot = if block.has(Letter::H) { block.word(Letter::H) as u32 } else { 0 };
                modal.tool_length_comp = Some(slot);
                device.tool(ToolOp::Comp, slot as i64)?;
            }
            GCode::G49 => {
                modal.tool_length_comp = None;
                device.tool(ToolOp::Comp, -1)?;
            }
            _ => unreachable!(),
        }
    }
    Ok(())
}

fn phase15_coord_system(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::CoordSystem) {
        modal.params.cs_index = cs_index_for(code);
        device.offset(modal.params.effective_offset())?;
    }
    Ok(())
}

fn phase16_path_control(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::PathControl) {
        modal.path_control = match code {
            GCode::G61 => PathControl::ExactPath,
            GCode::G61_1 => PathControl::ExactStop,
            GCode::G64 => PathControl::Continuous,
            _ => unreachable!(),
        };
        let name = match modal.path_control {
            PathControl::ExactPath => "EXACT_PATH",
            PathControl::ExactStop => "EXACT_STOP",
            PathControl::Continuous => "CONTINUOUS",
        };
        device.mode(Mode::PathControl, name)?;
    }
    Ok(())
}

fn phase17_distance_mode(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::Distance) {
        modal.distance = match code {
            GCode::G90 => DistanceMode::Absolute,
            GCode::G91 => DistanceMode::Incremental,
            _ => unreachable!(),
        };
        // Always pushed when the code appears in the block, not only on a
        // modal transition (see DESIGN.md Open Question 1).
        device.opt(Opt::Relative, modal.is_incremental())?;
    }
    Ok(())
}

fn phase18_retract_mode(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    if let Some(code) = block.gcode_in(ModalGroup::CannedReturn) {
        modal.retract = match code {
            GCode::G98 => RetractMode::Previous,
            GCode::G99 => RetractMode::RPlane,
            _ => unreachable!(),
        };
        device.opt(Opt::RetractToPrevious, matches!(modal.retract, RetractMode::Previous))?;
    }
    Ok(())
}

/// True for the non-modal codes whose positioning is fully resolved here,
/// in phase 19 — motion is not separately re-emitted for them at phase 20.
fn is_offset_family(code: GCode) -> bool {
    matches!(
        code,
        GCode::G10 | GCode::G28 | GCode::G30 | GCode::G92 | GCode::G92_1 | GCode::G92_2 | GCode::G92_3
    )
}

fn phase19_offsets_and_home(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    let Some(code) = block.gcode_in(ModalGroup::NonModal) else {
        return Ok(());
    };
    match code {
        GCode::G10 => {
            if block.word(Letter::L) as i64 == 2 && block.has(Letter::P) {
                let cs = block.word(Letter::P) as u32;
                let target = modal.params.coord_systems[(cs - 1) as usize];
                let mut updated = target;
                for (i, &letter) in AXIS_LETTERS.iter().enumerate() {
                    if block.has(letter) {
                        updated[i] = block.word(letter);
                    }
                }
                modal.params.coord_systems[(cs - 1) as usize] = updated;
                if cs == modal.params.cs_index {
                    device.offset(modal.params.effective_offset())?;
                }
            }
        }
        GCode::G28 => {
            let target = resolved_axis(block, modal);
            device.move_to(false, target)?;
            device.home(0)?;
            modal.last_axis = modal.params.home;
        }
        GCode::G30 => {
            let target = resolved_axis(block, modal);
            device.move_to(false, target)?;
            device.home(1)?;
            modal.last_axis = modal.params.work;
        }
        GCode::G92 => {
            for (i, &letter) in AXIS_LETTERS.iter().enumerate() {
                if block.has(letter) {
                    let machine_pos = modal.last_axis[i] - modal.params.offset[i];
                    modal.params.offset[i] = block.word(letter) - machine_pos;
                }
            }
            modal.params.offset_on = true;
            device.offset(modal.params.effective_offset())?;
        }
        GCode::G92_1 => {
            modal.params.offset = [0.0; 6];
            modal.params.offset_on = false;
            device.offset(modal.params.effective_offset())?;
        }
        GCode::G92_2 => {
            modal.params.offset_on = false;
            device.offset(modal.params.effective_offset())?;
        }
        GCode::G92_3 => {
            modal.params.offset_on = true;
            device.offset(modal.params.effective_offset())?;
        }
        _ => {}
    }
    Ok(())
}

fn phase20_motion(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    let non_modal = block.gcode_in(ModalGroup::NonModal);
    if non_modal.is_some_and(is_offset_family) {
        // Already fully handled in phase 19; group-1 modal state is left
        // untouched since this block did not carry its own motion code
        // (the checker forbids combining G10/G28/G30/G92 with motion).
        return Ok(());
    }

    let force_absolute = non_modal == Some(GCode::G53);
    let effective_motion = block.gcode_in(ModalGroup::Motion).or(modal.motion);

    match effective_motion {
        None => {}
        Some(code) if code.is_canned_cycle() => {
            // No drill/bore primitive exists on the device sink; canned
            // cycles update modal state and are fully validated by the
            // checker, but emit no device call here (see DESIGN.md Open
            // Question 8).
        }
        Some(GCode::G0) | Some(GCode::G1) => {
            let absolute = force_absolute;
            let target = resolved_axis(block, modal);
            let vec = if absolute { target } else { raw_axis(block) };
            if effective_motion == Some(GCode::G0) {
                device.move_to(absolute, vec)?;
            } else {
                device.line(absolute, vec)?;
            }
            modal.last_axis = target;
        }
        Some(code @ (GCode::G2 | GCode::G3)) => {
            let target = resolved_axis(block, modal);
            let cw = code == GCode::G2;
            if block.has(Letter::R) {
                device.rarc(target, block.word(Letter::R), cw)?;
            } else {
                let offsets = [block.word(Letter::I), block.word(Letter::J), block.word(Letter::K)];
                device.carc(target, offsets, cw)?;
            }
            modal.last_axis = target;
        }
        Some(GCode::G38_2) => {
            let target = resolved_axis(block, modal);
            device.probe(target)?;
            modal.last_axis = target;
        }
        Some(_) => {}
    }

    modal.motion = effective_motion;
    Ok(())
}

fn phase21_stop(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    let Some(code) = block.mcode_in(ModalGroup::MStop) else {
        return Ok(());
    };
    match code {
        MCode::M0 => device.stop(false)?,
        MCode::M1 => device.stop(true)?,
        MCode::M2 => {
            device.reset()?;
            modal.end_program();
        }
        MCode::M30 => {
            device.reset()?;
            device.pallet_shuttle()?;
            modal.reset();
        }
        MCode::M60 => {
            device.stop(false)?;
            device.pallet_shuttle()?;
        }
        _ => unreachable!(),
    }
    Ok(())
}

/// Execute a checked block against `modal`, emitting device calls in the
/// mandatory 21-phase canonical order. Stops at the first device failure.
#[tracing::instrument(name = "ngc.exec", skip_all, fields(gcodes = ?block.gcodes(), mcodes = ?block.mcodes()))]
pub fn execute(
    block: &Block,
    modal: &mut ModalState,
    device: &mut dyn DeviceSink,
) -> Result<(), DeviceError> {
    let run = || -> Result<(), DeviceError> {
        phase1_comment(block, device)?;
        phase2_feed_mode(block, modal, device)?;
        phase3_feed_rate(block, modal, device)?;
        phase4_spindle_speed(block, modal, device)?;
        phase5_tool_select(block, modal, device)?;
        phase6_tool_change(block, modal, device)?;
        phase7_spindle(block, modal, device)?;
        phase8_coolant(block, modal, device)?;
        phase9_overrides(block, modal, device)?;
        phase10_dwell(block, device)?;
        phase11_plane(block, modal, device)?;
        phase12_units(block, modal, device)?;
        phase13_cutter_comp(block, modal, device)?;
        phase14_tool_length_comp(block, modal, device)?;
        phase15_coord_system(block, modal, device)?;
        phase16_path_control(block, modal, device)?;
        phase17_distance_mode(block, modal, device)?;
        phase18_retract_mode(block, modal, device)?;
        tracing::trace!("phases 1-18 done, entering offsets/home");
        phase19_offsets_and_home(block, modal, device)?;
        phase20_motion(block, modal, device)?;
        phase21_stop(block, modal, device)
    };

    match run() {
        Ok(()) => {
            tracing::debug!("block executed");
            Ok(())
        }
        Err(err) => {
            tracing::error!(%err, "device call failed, aborting remaining phases");
            Err(err)
        }
    }
}
