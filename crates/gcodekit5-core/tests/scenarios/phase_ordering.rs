//! Scenario 6: phase ordering under a mixed block touching units, feed
//! rate, spindle speed, coolant, distance mode, and motion all at once.

use gcodekit5_core::{check, execute, Block, Conf, GCode, Letter, MCode, Mode, ModalState, Opt};

use crate::common::Call;
use crate::common::Recorder;

#[test]
fn mixed_block_emits_device_calls_in_canonical_order() {
    let mut modal = ModalState::new();

    let mut block = Block::new();
    block.set_gcode(GCode::G20);
    block.set_gcode(GCode::G90);
    block.set_gcode(GCode::G0);
    block.set_word(Letter::X, 1.0);
    block.set_word(Letter::F, 50.0);
    block.set_word(Letter::S, 200.0);
    block.set_mcode(MCode::M3);
    block.set_mcode(MCode::M8);

    assert!(check(&block, &modal).is_accepted());

    let mut device = Recorder::default();
    execute(&block, &mut modal, &mut device).unwrap();

    let trace = device.calls();
    let pos = |needle: &Call| trace.iter().position(|c| c == needle);

    let rate = pos(&Call::Conf(Conf::Rate, 50.0)).expect("feed rate pushed");
    let speed = pos(&Call::Conf(Conf::Speed, 200.0)).expect("spindle speed pushed");
    let spindle = trace
        .iter()
        .position(|c| matches!(c, Call::Spindle(_, _)))
        .expect("spindle call pushed");
    let coolant = trace
        .iter()
        .position(|c| matches!(c, Call::Coolant(_, _)))
        .expect("coolant call pushed");
    let units = trace
        .iter()
        .position(|c| matches!(c, Call::Mode(Mode::Units, _)))
        .expect("units mode pushed");
    let relative = pos(&Call::Opt(Opt::Relative, false)).expect("distance mode option pushed");
    let motion = pos(&Call::Move(false, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0])).expect("rapid move pushed");

    assert!(rate < speed, "feed rate precedes spindle speed (phase 3 before 4)");
    assert!(speed < spindle, "spindle speed config precedes the spindle starting (phase 4 before 7)");
    assert!(spindle < coolant, "spindle precedes coolant (phase 7 before 8)");
    assert!(coolant < units, "coolant precedes the units switch (phase 8 before 12)");
    assert!(units < relative, "units precedes the distance-mode option (phase 12 before 17)");
    assert!(relative < motion, "every prior phase precedes motion (phase 17 before 20)");
}
