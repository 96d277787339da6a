//! Scenario 4: G92 followed by G92.1 clears the axis offset it set.

use gcodekit5_core::{check, execute, Block, GCode, Letter, ModalState};

use crate::common::{Call, Recorder};

#[test]
fn g92_then_g92_1_clears_offset_and_pushes_twice() {
    let mut modal = ModalState::new();
    assert_eq!(modal.last_axis, [0.0; 6]);

    let mut g92 = Block::new();
    g92.set_gcode(GCode::G92);
    g92.set_word(Letter::X, 1.0);
    g92.set_word(Letter::Y, 2.0);
    assert!(check(&g92, &modal).is_accepted());

    let mut device = Recorder::default();
    execute(&g92, &mut modal, &mut device).unwrap();

    assert!(modal.params.offset_on);
    assert_eq!(modal.params.offset[0], 1.0);
    assert_eq!(modal.params.offset[1], 2.0);

    let mut g92_1 = Block::new();
    g92_1.set_gcode(GCode::G92_1);
    assert!(check(&g92_1, &modal).is_accepted());
    execute(&g92_1, &mut modal, &mut device).unwrap();

    assert!(!modal.params.offset_on);
    assert_eq!(modal.params.offset, [0.0; 6]);

    let offsets: Vec<_> = device
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Offset(_)))
        .collect();
    assert_eq!(offsets.len(), 2, "both G92 and G92.1 must push an offset() call");
}
