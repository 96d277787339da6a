//! Scenario 1: missing F word in inverse-time feed mode.

use gcodekit5_core::{check, Block, CheckError, GCode, Letter, ModalState};

#[test]
fn g93_then_g1_without_f_is_rejected() {
    let mut modal = ModalState::new();

    let mut g93 = Block::new();
    g93.set_gcode(GCode::G93);
    let report = check(&g93, &modal);
    assert!(report.is_accepted());
    modal.feed_mode = gcodekit5_core::FeedMode::InverseTime;

    let mut g1 = Block::new();
    g1.set_gcode(GCode::G1);
    g1.set_word(Letter::X, 10.0);
    let report = check(&g1, &modal);

    match report.error() {
        Some(CheckError::MissingFeedWord { code }) => {
            assert_eq!(code, "G1");
        }
        other => panic!("expected MissingFeedWord, got {other:?}"),
    }
}
