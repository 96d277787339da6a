//! The block checker: validates a parsed block against the current modal
//! state before any device call is emitted.
//!
//! Each active G-code is dispatched to its own rule function, the same way
//! the canonical NIST reference checker is one big switch over modal
//! groups. Only G-codes carry precondition rules; M-codes have none in this
//! implementation, matching the reference behavior.

use crate::block::Block;
use crate::diagnostics::CheckReport;
use crate::error::CheckError;
use crate::modal_state::ModalState;
use crate::taxonomy::{GCode, Letter, ModalGroup};

const INT_TOLERANCE: f64 = 0.0001;

/// True if `value` lies within [`INT_TOLERANCE`] of its nearest integer.
pub fn is_int(value: f64) -> bool {
    (value - value.round()).abs() < INT_TOLERANCE
}

fn require_int_range(
    report: &mut CheckReport,
    letter: Letter,
    value: f64,
    min: i64,
    max: i64,
) -> bool {
    if !is_int(value) {
        report.reject(CheckError::NotInteger { letter, value });
        return false;
    }
    let v = value.round() as i64;
    if v < min || v > max {
        report.reject(CheckError::OutOfRange {
            letter,
            value: v,
            min,
            max,
        });
        return false;
    }
    true
}

/// G0/G1/G38.2/G92 motion-presence rule. G0/G1 warn on no axis word; G38.2
/// and G92 error (the reference implementation only warns for all four, but
/// the governing specification's prose is explicit that G38.2 and G92 are
/// errors — see DESIGN.md Open Question 6).
fn motion_check(block: &Block, code: GCode, report: &mut CheckReport) {
    if block.present().has_any_axis() {
        return;
    }
    match code {
        GCode::G0 | GCode::G1 => report.warn(crate::error::CheckWarning::UselessAxisWord {
            code: code.to_string(),
            letter: Letter::X,
        }),
        _ => report.reject(CheckError::MissingAxisWord {
            code: code.to_string(),
        }),
    }
}

fn feed_check(block: &Block, modal: &ModalState, code: GCode, report: &mut CheckReport) {
    if modal.is_inverse_time() && !block.has(Letter::F) {
        report.reject(CheckError::MissingFeedWord {
            code: code.to_string(),
        });
    }
}

fn arc_check(block: &Block, modal: &ModalState, code: GCode, report: &mut CheckReport) {
    feed_check(block, modal, code, report);
    if !report.is_accepted() {
        return;
    }
    let (e1, e2) = modal.plane.endpoint_letters();
    if !block.has(e1) && !block.has(e2) {
        report.reject(CheckError::MissingArcEndpoint {
            letter: e1,
            plane: plane_name(modal),
        });
        return;
    }
    if block.has(Letter::R) {
        return;
    }
    let (o1, o2) = modal.plane.offset_letters();
    if !block.has(o1) && !block.has(o2) {
        report.reject(CheckError::MissingArcCenter {
            letter: o1,
            plane: plane_name(modal),
        });
    }
}

fn plane_name(modal: &ModalState) -> &'static str {
    match modal.plane {
        crate::taxonomy::Plane::Xy => "XY",
        crate::taxonomy::Plane::Xz => "XZ",
        crate::taxonomy::Plane::Yz => "YZ",
    }
}

fn delay_check(block: &Block, report: &mut CheckReport) {
    let p = block.word(Letter::P);
    if block.has(Letter::P) && p < 0.0 {
        report.reject(CheckError::NegativeDwell { value: p });
    }
}

fn forbid_with_motion(block: &Block, code: GCode, report: &mut CheckReport) {
    if let Some(motion) = block.gcode_in(ModalGroup::Motion) {
        report.reject(CheckError::ModalConflict {
            a: code.to_string(),
            b: motion.to_string(),
        });
    }
}

fn g10_check(block: &Block, report: &mut CheckReport) {
    forbid_with_motion(block, GCode::G10, report);
    if !report.is_accepted() {
        return;
    }
    if block.has(Letter::L) {
        require_int_range(report, Letter::L, block.word(Letter::L), 0, 1000);
    }
    if !report.is_accepted() {
        return;
    }
    if block.has(Letter::P) {
        require_int_range(report, Letter::P, block.word(Letter::P), 1, 9);
    }
}

fn g38_2_check(block: &Block, modal: &ModalState, report: &mut CheckReport) {
    if !block.has(Letter::X) && !block.has(Letter::Y) && !block.has(Letter::Z) {
        report.reject(CheckError::MissingAxisWord {
            code: GCode::G38_2.to_string(),
        });
        return;
    }
    if modal.is_inverse_time() {
        report.reject(CheckError::InverseTimeMode {
            code: GCode::G38_2.to_string(),
        });
    }
}

fn comp_check(block: &Block, modal: &ModalState, code: GCode, report: &mut CheckReport) {
    if modal.is_comp_active() {
        report.reject(CheckError::CompAlreadyActive);
        return;
    }
    if block.has(Letter::D) {
        require_int_range(report, Letter::D, block.word(Letter::D), 0, i64::MAX);
        if !report.is_accepted() {
            return;
        }
    }
    if modal.plane != crate::taxonomy::Plane::Xy {
        report.reject(CheckError::WrongPlane {
            code: code.to_string(),
            plane: plane_name(modal),
        });
    }
}

fn g43_check(block: &Block, report: &mut CheckReport) {
    if block.has(Letter::H) {
        require_int_range(report, Letter::H, block.word(Letter::H), 0, 1000);
    }
}

fn g53_check(block: &Block, modal: &ModalState, report: &mut CheckReport) {
    let effective_motion = block.gcode_in(ModalGroup::Motion).or(modal.motion);
    let allowed = matches!(effective_motion, Some(GCode::G0) | Some(GCode::G1));
    if !allowed {
        report.reject(CheckError::ModalConflict {
            a: GCode::G53.to_string(),
            b: "a motion code other than G0/G1".to_string(),
        });
        return;
    }
    if modal.is_comp_active() {
        report.reject(CheckError::CompActive {
            code: GCode::G53.to_string(),
        });
    }
}

fn work_offset_check(modal: &ModalState, code: GCode, report: &mut CheckReport) {
    if modal.is_comp_active() {
        report.reject(CheckError::CompActive {
            code: code.to_string(),
        });
    }
}

fn g80_check(block: &Block, report: &mut CheckReport) {
    let non_modal_axis_consumer = block.gcode_in(ModalGroup::NonModal).is_some();
    if block.present().has_any_axis() && !non_modal_axis_consumer {
        report.warn(crate::error::CheckWarning::UselessAxisWord {
            code: GCode::G80.to_string(),
            letter: Letter::X,
        });
    }
}

fn canned_cycle_check(block: &Block, modal: &ModalState, code: GCode, report: &mut CheckReport) {
    if !block.has(Letter::X) && !block.has(Letter::Y) && !block.has(Letter::Z) {
        report.reject(CheckError::MissingAxisWord {
            code: code.to_string(),
        });
        return;
    }
    if block.has(Letter::L) {
        require_int_range(report, Letter::L, block.word(Letter::L), 1, i64::MAX);
        if !report.is_accepted() {
            return;
        }
    }

    let perpendicular = modal.plane.perpendicular_letter();
    let first_invocation = modal.motion != Some(code);
    if first_invocation && !block.has(perpendicular) {
        report.reject(CheckError::MissingFirstInvocationAxis {
            code: code.to_string(),
            letter: perpendicular,
        });
        return;
    }

    if block.has(Letter::R) {
        let bottom = block.word(perpendicular);
        if block.word(Letter::R) < bottom {
            report.reject(CheckError::RetractBelowBottom {
                code: code.to_string(),
            });
            return;
        }
    }

    if modal.is_inverse_time() {
        report.reject(CheckError::InverseTimeMode {
            code: code.to_string(),
        });
        return;
    }
    if modal.is_comp_active() {
        report.reject(CheckError::CompActive {
            code: code.to_string(),
        });
        return;
    }

    let needs_dwell = matches!(code, GCode::G82 | GCode::G86 | GCode::G88 | GCode::G89);
    if needs_dwell {
        delay_check(block, report);
    }
}

fn g92_check(block: &Block, report: &mut CheckReport) {
    forbid_with_motion(block, GCode::G92, report);
    if !report.is_accepted() {
        return;
    }
    motion_check(block, GCode::G92, report);
}

/// Dispatch one active G-code to its rule function.
fn check_one(block: &Block, modal: &ModalState, code: GCode, report: &mut CheckReport) {
    use GCode::*;
    match code {
        G4 => delay_check(block, report),
        G10 => g10_check(block, report),
        G28 | G30 => forbid_with_motion(block, code, report),
        G53 => g53_check(block, modal, report),
        G92 => g92_check(block, report),
        G92_1 | G92_2 | G92_3 => {}
        G0 | G1 => {
            if matches!(code, G1) {
                feed_check(block, modal, code, report);
                if !report.is_accepted() {
                    return;
                }
            }
            motion_check(block, code, report);
        }
        G2 | G3 => arc_check(block, modal, code, report),
        G38_2 => g38_2_check(block, modal, report),
        G80 => g80_check(block, report),
        G81 | G82 | G83 | G84 | G85 | G86 | G87 | G88 | G89 => {
            canned_cycle_check(block, modal, code, report)
        }
        G17 | G18 | G19 => {}
        G90 | G91 => {}
        G93 | G94 => {}
        G20 | G21 => {}
        G40 => {}
        G41 | G42 => comp_check(block, modal, code, report),
        G43 => g43_check(block, report),
        G49 => {}
        G98 | G99 => {}
        G54 | G55 | G56 | G57 | G58 | G59 | G59_1 | G59_2 | G59_3 => {
            work_offset_check(modal, code, report)
        }
        G61 | G61_1 | G64 => {}
    }
}

/// Check every active code in `block` against `modal`. Does not mutate
/// `modal`: checking is read-only. Stops at the first error; accumulates
/// all warnings raised before that point.
#[tracing::instrument(name = "ngc.check", skip_all, fields(gcodes = ?block.gcodes(), mcodes = ?block.mcodes()))]
pub fn check(block: &Block, modal: &ModalState) -> CheckReport {
    // Canonical group dispatch order, mirroring the reference checker's
    // group-table iteration rather than source/parse order.
    const ORDER: &[ModalGroup] = &[
        ModalGroup::NonModal,
        ModalGroup::Motion,
        ModalGroup::Plane,
        ModalGroup::Distance,
        ModalGroup::FeedMode,
        ModalGroup::Units,
        ModalGroup::CutterComp,
        ModalGroup::ToolLengthComp,
        ModalGroup::CannedReturn,
        ModalGroup::CoordSystem,
        ModalGroup::PathControl,
    ];

    let mut report = CheckReport::new();
    for &group in ORDER {
        if !report.is_accepted() {
            break;
        }
        if let Some(code) = block.gcode_in(group) {
            check_one(block, modal, code, &mut report);
        }
    }

    if let Some(error) = report.error() {
        if error.is_internal() {
            tracing::error!(%error, "internal dispatch error");
        } else {
            tracing::warn!(%error, "block rejected");
        }
    }
    for warning in report.warnings() {
        tracing::debug!(%warning, "check warning");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Plane;

    fn block_with(codes: &[GCode], words: &[(Letter, f64)]) -> Block {
        let mut b = Block::new();
        for &c in codes {
            b.set_gcode(c);
        }
        for &(l, v) in words {
            b.set_word(l, v);
        }
        b
    }

    #[test]
    fn inverse_time_requires_feed_word() {
        let modal = {
            let mut m = ModalState::new();
            m.feed_mode = crate::modal_state::FeedMode::InverseTime;
            m
        };
        let block = block_with(&[GCode::G1], &[(Letter::X, 10.0)]);
        let report = check(&block, &modal);
        assert_eq!(
            report.error(),
            Some(&CheckError::MissingFeedWord {
                code: "G1".to_string()
            })
        );
    }

    #[test]
    fn g2_center_form_requires_offsets() {
        let modal = ModalState::new();
        let block = block_with(
            &[GCode::G2],
            &[(Letter::X, 10.0), (Letter::Y, 0.0), (Letter::F, 100.0)],
        );
        let report = check(&block, &modal);
        assert!(matches!(report.error(), Some(CheckError::MissingArcCenter { .. })));
    }

    #[test]
    fn g2_center_form_valid_with_offsets() {
        let modal = ModalState::new();
        let block = block_with(
            &[GCode::G2],
            &[
                (Letter::X, 10.0),
                (Letter::Y, 0.0),
                (Letter::I, 5.0),
                (Letter::F, 100.0),
            ],
        );
        let report = check(&block, &modal);
        assert!(report.is_accepted());
    }

    #[test]
    fn g10_l2_p2_valid() {
        let modal = ModalState::new();
        let block = block_with(
            &[GCode::G10],
            &[(Letter::L, 2.0), (Letter::P, 2.0), (Letter::X, 1.0)],
        );
        let report = check(&block, &modal);
        assert!(report.is_accepted());
    }

    #[test]
    fn g92_with_no_axis_word_is_an_error() {
        let modal = ModalState::new();
        let block = block_with(&[GCode::G92], &[]);
        let report = check(&block, &modal);
        assert_eq!(
            report.error(),
            Some(&CheckError::MissingAxisWord {
                code: "G92".to_string()
            })
        );
    }

    #[test]
    fn g81_first_invocation_requires_perpendicular_axis() {
        let mut modal = ModalState::new();
        modal.plane = Plane::Xy;
        let block = block_with(
            &[GCode::G81],
            &[(Letter::X, 1.0), (Letter::Y, 1.0), (Letter::R, 5.0)],
        );
        let report = check(&block, &modal);
        assert_eq!(
            report.error(),
            Some(&CheckError::MissingFirstInvocationAxis {
                code: "G81".to_string(),
                letter: Letter::Z,
            })
        );
    }

    #[test]
    fn g81_second_invocation_does_not_require_perpendicular_axis() {
        let mut modal = ModalState::new();
        modal.motion = Some(GCode::G81);
        let block = block_with(
            &[GCode::G81],
            &[(Letter::X, 2.0), (Letter::Y, 2.0), (Letter::R, 5.0)],
        );
        let report = check(&block, &modal);
        assert!(report.is_accepted());
    }

    #[test]
    fn g53_requires_g0_or_g1() {
        let mut modal = ModalState::new();
        modal.motion = Some(GCode::G2);
        let block = block_with(&[GCode::G53], &[]);
        let report = check(&block, &modal);
        assert!(matches!(report.error(), Some(CheckError::ModalConflict { .. })));
    }

    #[test]
    fn g80_with_useless_axis_word_warns() {
        let block = block_with(&[GCode::G80], &[(Letter::X, 1.0)]);
        let report = check(&block, &ModalState::new());
        assert!(report.is_accepted());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn integer_tolerance_accepts_near_integers() {
        assert!(is_int(2.00005));
        assert!(is_int(1.99996));
        assert!(!is_int(2.001));
    }

    #[test]
    fn g10_non_integer_l_is_rejected() {
        let block = block_with(&[GCode::G10], &[(Letter::L, 2.3)]);
        let report = check(&block, &ModalState::new());
        assert!(matches!(report.error(), Some(CheckError::NotInteger { .. })));
    }
}
