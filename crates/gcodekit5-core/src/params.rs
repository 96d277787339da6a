//! Numbered-parameter storage, addressable both by name (for the engine and
//! checker) and by raw NIST/EMC2 slot number (for the external contract).

/// Slot number of the G28 home-position axis storage (X; Y..C follow at +1..+5).
pub const HOME_BASE: u32 = 5161;
/// Slot number of the G30 secondary home-position axis storage.
pub const WORK_BASE: u32 = 5181;
/// Slot number of the probe-result axis storage.
pub const PROBE_BASE: u32 = 5061;
/// Slot number of the probe success/failure flag.
pub const PROBE_OK: u32 = 5070;
/// Slot number of the G92 axis-offset enabled flag.
pub const OFFSET_ON: u32 = 5210;
/// Slot number of the G92 axis-offset axis storage.
pub const OFFSET_BASE: u32 = 5211;
/// Slot number of the active coordinate-system index (1-9).
pub const CS_INDEX: u32 = 5220;
/// Slot number of CS1's X axis; CS2..CS9 follow at +20 per system.
pub const CS1_BASE: u32 = 5221;
/// Per-coordinate-system stride between CS1 and CS2, CS2 and CS3, etc.
pub const CS_STRIDE: u32 = 20;
/// Slot number of the M66 digital/analog input result (EMC2 extension).
pub const INPUT: u32 = 5399;
/// Slot number of the currently selected tool.
pub const TOOL: u32 = 5400;
/// Slot number of the current tool's axis offsets.
pub const TOOL_OFFSET_BASE: u32 = 5401;
/// Slot number of the current tool's diameter.
pub const TOOL_DIAMETER: u32 = 5410;
/// Slot number of the current tool's front angle.
pub const TOOL_FRONT_ANGLE: u32 = 5411;
/// Slot number of the current tool's back angle.
pub const TOOL_BACK_ANGLE: u32 = 5412;
/// Slot number of the current tool's orientation.
pub const TOOL_ORIENTATION: u32 = 5413;

/// The slot number of coordinate system `cs`'s X axis (`cs` is 1-9).
///
/// Standardized on `(cs - 1) * CS_STRIDE` from [`CS1_BASE`], matching this
/// specification's formula; the original source disagreed with itself about
/// whether the stride should start at `cs` or `cs - 1` (see DESIGN.md).
pub fn cs_base_slot(cs: u32) -> u32 {
    debug_assert!((1..=9).contains(&cs), "coordinate system index out of range");
    CS1_BASE + (cs - 1) * CS_STRIDE
}

/// The numbered-parameter table: probe results, home positions, G92
/// offsets, the nine coordinate systems, and the active tool's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Last probe-contact position, X,Y,Z,A,B,C (slots 5061-5066).
    pub probe: [f64; 6],
    /// Whether the last probe move made contact (slot 5070).
    pub probe_ok: bool,
    /// G28 home position, X,Y,Z,A,B,C (slots 5161-5166).
    pub home: [f64; 6],
    /// G30 secondary home position, X,Y,Z,A,B,C (slots 5181-5186).
    pub work: [f64; 6],
    /// Whether the G92 axis offset is currently applied (slot 5210).
    pub offset_on: bool,
    /// G92 axis offset, X,Y,Z,A,B,C (slots 5211-5216).
    pub offset: [f64; 6],
    /// Currently selected coordinate system, 1-9 (slot 5220).
    pub cs_index: u32,
    /// The nine coordinate systems' axis offsets, CS1 first.
    pub coord_systems: [[f64; 6]; 9],
    /// M66 digital/analog input result, an EMC2 extension (slot 5399).
    pub input: f64,
    /// Currently selected tool slot (slot 5400).
    pub tool: u32,
    /// Current tool's axis offsets, X,Y,Z,A,B,C (slots 5401-5406).
    pub tool_offset: [f64; 6],
    /// Current tool's diameter (slot 5410).
    pub tool_diameter: f64,
    /// Current tool's front angle (slot 5411).
    pub tool_front_angle: f64,
    /// Current tool's back angle (slot 5412).
    pub tool_back_angle: f64,
    /// Current tool's orientation code (slot 5413).
    pub tool_orientation: f64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            probe: [0.0; 6],
            probe_ok: false,
            home: [0.0; 6],
            work: [0.0; 6],
            offset_on: false,
            offset: [0.0; 6],
            cs_index: 1,
            coord_systems: [[0.0; 6]; 9],
            input: 0.0,
            tool: 0,
            tool_offset: [0.0; 6],
            tool_diameter: 0.0,
            tool_front_angle: 0.0,
            tool_back_angle: 0.0,
            tool_orientation: 0.0,
        }
    }
}

impl Params {
    /// Read a parameter by its raw NIST/EMC2 slot number.
    ///
    /// Returns `None` for slots this implementation does not model (outside
    /// the documented ranges).
    pub fn get(&self, slot: u32) -> Option<f64> {
        if let Some(i) = axis_offset(slot, PROBE_BASE) {
            return Some(self.probe[i]);
        }
        if slot == PROBE_OK {
            return Some(if self.probe_ok { 1.0 } else { 0.0 });
        }
        if let Some(i) = axis_offset(slot, HOME_BASE) {
            return Some(self.home[i]);
        }
        if let Some(i) = axis_offset(slot, WORK_BASE) {
            return Some(self.work[i]);
        }
        if slot == OFFSET_ON {
            return Some(if self.offset_on { 1.0 } else { 0.0 });
        }
        if let Some(i) = axis_offset(slot, OFFSET_BASE) {
            return Some(self.offset[i]);
        }
        if slot == CS_INDEX {
            return Some(self.cs_index as f64);
        }
        for cs in 1..=9u32 {
            if let Some(i) = axis_offset(slot, cs_base_slot(cs)) {
                return Some(self.coord_systems[(cs - 1) as usize][i]);
            }
        }
        if slot == INPUT {
            return Some(self.input);
        }
        if slot == TOOL {
            return Some(self.tool as f64);
        }
        if let Some(i) = axis_offset(slot, TOOL_OFFSET_BASE) {
            return Some(self.tool_offset[i]);
        }
        match slot {
            TOOL_DIAMETER => Some(self.tool_diameter),
            TOOL_FRONT_ANGLE => Some(self.tool_front_angle),
            TOOL_BACK_ANGLE => Some(self.tool_back_angle),
            TOOL_ORIENTATION => Some(self.tool_orientation),
            _ => None,
        }
    }

    /// Write a parameter by its raw NIST/EMC2 slot number. Returns `false`
    /// if the slot is not modeled.
    pub fn set(&mut self, slot: u32, value: f64) -> bool {
        if let Some(i) = axis_offset(slot, PROBE_BASE) {
            self.probe[i] = value;
            return true;
        }
        if slot == PROBE_OK {
            self.probe_ok = value != 0.0;
            return true;
        }
        if let Some(i) = axis_offset(slot, HOME_BASE) {
            self.home[i] = value;
            return true;
        }
        if let Some(i) = axis_offset(slot, WORK_BASE) {
            self.work[i] = value;
            return true;
        }
        if slot == OFFSET_ON {
            self.offset_on = value != 0.0;
            return true;
        }
        if let Some(i) = axis_offset(slot, OFFSET_BASE) {
            self.offset[i] = value;
            return true;
        }
        if slot == CS_INDEX {
            self.cs_index = value as u32;
            return true;
        }
        for cs in 1..=9u32 {
            if let Some(i) = axis_offset(slot, cs_base_slot(cs)) {
                self.coord_systems[(cs - 1) as usize][i] = value;
                return true;
            }
        }
        if slot == INPUT {
            self.input = value;
            return true;
        }
        if slot == TOOL {
            self.tool = value as u32;
            return true;
        }
        if let Some(i) = axis_offset(slot, TOOL_OFFSET_BASE) {
            self.tool_offset[i] = value;
            return true;
        }
        match slot {
            TOOL_DIAMETER => self.tool_diameter = value,
            TOOL_FRONT_ANGLE => self.tool_front_angle = value,
            TOOL_BACK_ANGLE => self.tool_back_angle = value,
            TOOL_ORIENTATION => self.tool_orientation = value,
            _ => return false,
        }
        true
    }

    /// The currently selected coordinate system's axis offsets.
    pub fn active_coord_system(&self) -> [f64; 6] {
        self.coord_systems[(self.cs_index.clamp(1, 9) - 1) as usize]
    }

    /// The currently selected coordinate system's axis offsets, mutably.
    pub fn active_coord_system_mut(&mut self) -> &mut [f64; 6] {
        &mut self.coord_systems[(self.cs_index.clamp(1, 9) - 1) as usize]
    }

    /// The effective offset applied to every motion: the active coordinate
    /// system plus the G92 offset, when enabled.
    pub fn effective_offset(&self) -> [f64; 6] {
        let cs = self.active_coord_system();
        let mut out = cs;
        if self.offset_on {
            for i in 0..6 {
                out[i] += self.offset[i];
            }
        }
        out
    }
}

/// If `slot` lies in the 6-wide axis block starting at `base`, the
/// zero-based axis index (0=X,1=Y,2=Z,3=A,4=B,5=C).
fn axis_offset(slot: u32, base: u32) -> Option<usize> {
    if slot >= base && slot < base + 6 {
        Some((slot - base) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cs_base_slot_formula() {
        assert_eq!(cs_base_slot(1), 5221);
        assert_eq!(cs_base_slot(2), 5241);
        assert_eq!(cs_base_slot(9), 5381);
    }

    #[test]
    fn get_set_roundtrip_tool_offset() {
        let mut p = Params::default();
        assert!(p.set(5403, 12.5));
        assert_eq!(p.get(5403), Some(12.5));
        assert_eq!(p.tool_offset[2], 12.5);
    }

    #[test]
    fn get_set_roundtrip_coord_system() {
        let mut p = Params::default();
        assert!(p.set(5241, 1.0));
        assert!(p.set(5242, 2.0));
        assert!(p.set(5243, 3.0));
        assert_eq!(p.coord_systems[1], [1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn unmodeled_slot_returns_none() {
        let p = Params::default();
        assert_eq!(p.get(9999), None);
    }

    #[test]
    fn effective_offset_combines_cs_and_g92() {
        let mut p = Params::default();
        p.coord_systems[0] = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        p.offset = [1.0, 2.0, 0.0, 0.0, 0.0, 0.0];
        p.offset_on = true;
        assert_eq!(p.effective_offset(), [11.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        p.offset_on = false;
        assert_eq!(p.effective_offset(), [10.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
