//! Shared recording device sink for the scenario tests.

use std::cell::RefCell;
use std::rc::Rc;

use gcodekit5_core::{Conf, Coolant, CutterOp, DeviceError, DeviceSink, Mode, Opt, SpindleDir, ToolOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Mode(Mode, String),
    Conf(Conf, f64),
    Offset([f64; 6]),
    Move(bool, [f64; 6]),
    Home(u8),
    Line(bool, [f64; 6]),
    Carc([f64; 6], [f64; 3], bool),
    Rarc([f64; 6], f64, bool),
    Dwell(f64),
    Probe([f64; 6]),
    Stop(bool),
    Spindle(SpindleDir, f64),
    Tool(ToolOp, i64),
    Cutter(CutterOp, i64),
    Comment(String),
    Message(String),
    Opt(Opt, bool),
    Coolant(Coolant, bool),
    Reset,
    PalletShuttle,
}

#[derive(Default, Clone)]
pub struct Recorder {
    pub calls: Rc<RefCell<Vec<Call>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl DeviceSink for Recorder {
    fn mode(&mut self, mode: Mode, value: &str) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Mode(mode, value.to_string()));
        Ok(())
    }
    fn conf(&mut self, conf: Conf, value: f64) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Conf(conf, value));
        Ok(())
    }
    fn offset(&mut self, vec6: [f64; 6]) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Offset(vec6));
        Ok(())
    }
    fn move_to(&mut self, absolute: bool, vec6: [f64; 6]) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Move(absolute, vec6));
        Ok(())
    }
    fn home(&mut self, index: u8) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Home(index));
        Ok(())
    }
    fn line(&mut self, absolute: bool, vec6: [f64; 6]) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Line(absolute, vec6));
        Ok(())
    }
    fn carc(&mut self, end: [f64; 6], offsets: [f64; 3], cw: bool) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Carc(end, offsets, cw));
        Ok(())
    }
    fn rarc(&mut self, end: [f64; 6], radius: f64, cw: bool) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Rarc(end, radius, cw));
        Ok(())
    }
    fn dwell(&mut self, seconds: f64) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Dwell(seconds));
        Ok(())
    }
    fn probe(&mut self, target: [f64; 6]) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Probe(target));
        Ok(())
    }
    fn stop(&mut self, optional: bool) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Stop(optional));
        Ok(())
    }
    fn spindle(&mut self, dir: SpindleDir, speed: f64) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Spindle(dir, speed));
        Ok(())
    }
    fn tool(&mut self, op: ToolOp, slot: i64) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Tool(op, slot));
        Ok(())
    }
    fn cutter(&mut self, op: CutterOp, slot: i64) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Cutter(op, slot));
        Ok(())
    }
    fn comment(&mut self, text: &str) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Comment(text.to_string()));
        Ok(())
    }
    fn message(&mut self, text: &str) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Message(text.to_string()));
        Ok(())
    }
    fn opt(&mut self, option: Opt, on: bool) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Opt(option, on));
        Ok(())
    }
    fn coolant(&mut self, channel: Coolant, on: bool) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Coolant(channel, on));
        Ok(())
    }
    fn reset(&mut self) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::Reset);
        Ok(())
    }
    fn pallet_shuttle(&mut self) -> Result<(), DeviceError> {
        self.calls.borrow_mut().push(Call::PalletShuttle);
        Ok(())
    }
}
