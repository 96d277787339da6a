//! Scenario 5: a canned cycle's first invocation requires its
//! perpendicular axis word.

use gcodekit5_core::{check, Block, CheckError, GCode, Letter, ModalState};

#[test]
fn g81_first_invocation_without_z_is_rejected() {
    // Defaults to the XY plane, absolute distance mode, no prior motion.
    let modal = ModalState::new();

    let mut g81 = Block::new();
    g81.set_gcode(GCode::G81);
    g81.set_word(Letter::X, 1.0);
    g81.set_word(Letter::Y, 1.0);
    g81.set_word(Letter::R, 5.0);

    let report = check(&g81, &modal);
    match report.error() {
        Some(CheckError::MissingFirstInvocationAxis { code, letter }) => {
            assert_eq!(code, "G81");
            assert_eq!(letter, &Letter::Z);
        }
        other => panic!("expected MissingFirstInvocationAxis, got {other:?}"),
    }
}
