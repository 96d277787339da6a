#[path = "scenarios/common.rs"]
mod common;
#[path = "scenarios/inverse_time.rs"]
mod inverse_time;
#[path = "scenarios/arc_center_form.rs"]
mod arc_center_form;
#[path = "scenarios/coordinate_system.rs"]
mod coordinate_system;
#[path = "scenarios/axis_offset.rs"]
mod axis_offset;
#[path = "scenarios/canned_cycle.rs"]
mod canned_cycle;
#[path = "scenarios/phase_ordering.rs"]
mod phase_ordering;
