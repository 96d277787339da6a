//! Scenario 2: a center-form G2 arc in the XY plane.

use gcodekit5_core::{check, execute, Block, GCode, Letter, ModalState};

use crate::common::{Call, Recorder};

#[test]
fn g2_center_form_in_xy_plane_emits_carc() {
    let mut modal = ModalState::new();

    let mut setup = Block::new();
    setup.set_gcode(GCode::G17);
    setup.set_gcode(GCode::G90);
    setup.set_gcode(GCode::G1);
    setup.set_word(Letter::X, 0.0);
    setup.set_word(Letter::Y, 0.0);
    setup.set_word(Letter::F, 100.0);
    assert!(check(&setup, &modal).is_accepted());
    let mut device = Recorder::default();
    execute(&setup, &mut modal, &mut device).unwrap();

    let mut arc = Block::new();
    arc.set_gcode(GCode::G2);
    arc.set_word(Letter::X, 10.0);
    arc.set_word(Letter::Y, 0.0);
    arc.set_word(Letter::I, 5.0);
    arc.set_word(Letter::J, 0.0);
    let report = check(&arc, &modal);
    assert!(report.is_accepted(), "{:?}", report.error());

    let mut device = Recorder::default();
    execute(&arc, &mut modal, &mut device).unwrap();

    assert!(device
        .calls()
        .contains(&Call::Carc([10.0, 0.0, 0.0, 0.0, 0.0, 0.0], [5.0, 0.0, 0.0], true)));
}
