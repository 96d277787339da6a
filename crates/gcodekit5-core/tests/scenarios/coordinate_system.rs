//! Scenario 3: G10 L2 P2 sets the CS2 coordinate system without switching
//! to it.

use gcodekit5_core::{check, execute, Block, GCode, Letter, ModalState};

use crate::common::Recorder;

#[test]
fn g10_l2_p2_writes_cs2_without_switching_active_cs() {
    let mut modal = ModalState::new();
    assert_eq!(modal.params.cs_index, 1);

    let mut block = Block::new();
    block.set_gcode(GCode::G10);
    block.set_word(Letter::L, 2.0);
    block.set_word(Letter::P, 2.0);
    block.set_word(Letter::X, 1.0);
    block.set_word(Letter::Y, 2.0);
    block.set_word(Letter::Z, 3.0);

    assert!(check(&block, &modal).is_accepted());

    let mut device = Recorder::default();
    execute(&block, &mut modal, &mut device).unwrap();

    let cs2 = modal.params.coord_systems[1];
    assert_eq!((cs2[0], cs2[1], cs2[2]), (1.0, 2.0, 3.0));
    assert_eq!(modal.params.cs_index, 1, "CS2 write must not switch the active CS");
    assert!(device.calls().is_empty(), "CS2 is not the active CS, so no offset() push is expected");
}
