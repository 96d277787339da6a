//! The closed command taxonomy: G-codes, M-codes, modal groups, and the
//! letter/axis bitmasks the checker and engine dispatch on.

use std::fmt;

use bitflags::bitflags;

/// One of the 26 word letters a block may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Letter {
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
}

impl Letter {
    /// The bit this letter occupies in a [`WordMap`].
    pub fn mask(self) -> WordMap {
        WordMap::from_bits_truncate(1 << (self as u32))
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

bitflags! {
    /// Bitmap of which letters were explicitly present in a block, and the
    /// derived axis/plane/offset masks the checker and engine test against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WordMap: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const C = 1 << 2;
        const D = 1 << 3;
        const E = 1 << 4;
        const F = 1 << 5;
        const G = 1 << 6;
        const H = 1 << 7;
        const I = 1 << 8;
        const J = 1 << 9;
        const K = 1 << 10;
        const L = 1 << 11;
        const M = 1 << 12;
        const N = 1 << 13;
        const O = 1 << 14;
        const P = 1 << 15;
        const Q = 1 << 16;
        const R = 1 << 17;
        const S = 1 << 18;
        const T = 1 << 19;
        const U = 1 << 20;
        const V = 1 << 21;
        const W = 1 << 22;
        const X = 1 << 23;
        const Y = 1 << 24;
        const Z = 1 << 25;

        const ABC = Self::A.bits() | Self::B.bits() | Self::C.bits();
        const XYZ = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
        const AXIS = Self::ABC.bits() | Self::XYZ.bits();
        const XY = Self::X.bits() | Self::Y.bits();
        const XZ = Self::X.bits() | Self::Z.bits();
        const YZ = Self::Y.bits() | Self::Z.bits();
        const IJ = Self::I.bits() | Self::J.bits();
        const IK = Self::I.bits() | Self::K.bits();
        const JK = Self::J.bits() | Self::K.bits();
    }
}

impl WordMap {
    /// True if any of the six axis letters are present.
    pub fn has_any_axis(self) -> bool {
        self.intersects(WordMap::AXIS)
    }
}

/// The active plane selected by G17/G18/G19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Plane {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// The two axis letters that make up this plane's end-point words.
    pub fn endpoint_letters(self) -> (Letter, Letter) {
        match self {
            Plane::Xy => (Letter::X, Letter::Y),
            Plane::Xz => (Letter::X, Letter::Z),
            Plane::Yz => (Letter::Y, Letter::Z),
        }
    }

    /// The two offset letters (I/J/K) used by center-form arcs in this plane.
    pub fn offset_letters(self) -> (Letter, Letter) {
        match self {
            Plane::Xy => (Letter::I, Letter::J),
            Plane::Xz => (Letter::I, Letter::K),
            Plane::Yz => (Letter::J, Letter::K),
        }
    }

    /// The axis letter perpendicular to this plane (the canned-cycle
    /// retract/plunge axis).
    pub fn perpendicular_letter(self) -> Letter {
        match self {
            Plane::Xy => Letter::Z,
            Plane::Xz => Letter::Y,
            Plane::Yz => Letter::X,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Plane::Xy => "XY",
            Plane::Xz => "XZ",
            Plane::Yz => "YZ",
        };
        write!(f, "{s}")
    }
}

/// The modal groups defined by RS274/NGC. Group numbers 4, 9, and 11 are
/// deliberately unused in the standard and have no corresponding variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalGroup {
    /// Group 0: non-modal codes (G4, G10, G28, G30, G53, G92 family).
    NonModal,
    /// Group 1: motion.
    Motion,
    /// Group 2: plane selection.
    Plane,
    /// Group 3: distance mode.
    Distance,
    /// Group 5: feed rate mode.
    FeedMode,
    /// Group 6: units.
    Units,
    /// Group 7: cutter radius compensation.
    CutterComp,
    /// Group 8: tool length compensation.
    ToolLengthComp,
    /// Group 10: canned cycle return mode.
    CannedReturn,
    /// Group 12: coordinate system selection.
    CoordSystem,
    /// Group 13: path control mode.
    PathControl,
    /// M-group 4: stopping.
    MStop,
    /// M-group 6: tool change.
    MToolChange,
    /// M-group 7: spindle.
    MSpindle,
    /// M-group 8: coolant.
    MCoolant,
    /// M-group 9: feed/speed override enable.
    MOverride,
}

/// Every G-code this interpreter understands, grouped in source order by
/// the modal group it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum GCode {
    // Group 0: non-modal
    G4,
    G10,
    G28,
    G30,
    G53,
    G92,
    G92_1,
    G92_2,
    G92_3,
    // Group 1: motion
    G0,
    G1,
    G2,
    G3,
    G38_2,
    G80,
    G81,
    G82,
    G83,
    G84,
    G85,
    G86,
    G87,
    G88,
    G89,
    // Group 2: plane
    G17,
    G18,
    G19,
    // Group 3: distance
    G90,
    G91,
    // Group 5: feed mode
    G93,
    G94,
    // Group 6: units
    G20,
    G21,
    // Group 7: cutter comp
    G40,
    G41,
    G42,
    // Group 8: tool length comp
    G43,
    G49,
    // Group 10: canned return
    G98,
    G99,
    // Group 12: coordinate system
    G54,
    G55,
    G56,
    G57,
    G58,
    G59,
    G59_1,
    G59_2,
    G59_3,
    // Group 13: path control
    G61,
    G61_1,
    G64,
}

impl GCode {
    /// The modal group this code belongs to.
    pub fn group(self) -> ModalGroup {
        use GCode::*;
        match self {
            G4 | G10 | G28 | G30 | G53 | G92 | G92_1 | G92_2 | G92_3 => ModalGroup::NonModal,
            G0 | G1 | G2 | G3 | G38_2 | G80 | G81 | G82 | G83 | G84 | G85 | G86 | G87 | G88
            | G89 => ModalGroup::Motion,
            G17 | G18 | G19 => ModalGroup::Plane,
            G90 | G91 => ModalGroup::Distance,
            G93 | G94 => ModalGroup::FeedMode,
            G20 | G21 => ModalGroup::Units,
            G40 | G41 | G42 => ModalGroup::CutterComp,
            G43 | G49 => ModalGroup::ToolLengthComp,
            G98 | G99 => ModalGroup::CannedReturn,
            G54 | G55 | G56 | G57 | G58 | G59 | G59_1 | G59_2 | G59_3 => ModalGroup::CoordSystem,
            G61 | G61_1 | G64 => ModalGroup::PathControl,
        }
    }

    /// True for G81-G89: the canned-cycle drilling/boring family.
    pub fn is_canned_cycle(self) -> bool {
        use GCode::*;
        matches!(self, G81 | G82 | G83 | G84 | G85 | G86 | G87 | G88 | G89)
    }

    /// True for G2/G3: the arc-motion codes.
    pub fn is_arc(self) -> bool {
        matches!(self, GCode::G2 | GCode::G3)
    }
}

impl fmt::Display for GCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!("{self:?}").replace('_', ".");
        write!(f, "{s}")
    }
}

/// Every M-code this interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MCode {
    // Group 4: stopping
    M0,
    M1,
    M2,
    M30,
    M60,
    // Group 6: tool change
    M6,
    // Group 7: spindle
    M3,
    M4,
    M5,
    // Group 8: coolant
    M7,
    M8,
    M9,
    // Group 9: overrides
    M48,
    M49,
}

impl MCode {
    /// The modal group this code belongs to.
    pub fn group(self) -> ModalGroup {
        use MCode::*;
        match self {
            M0 | M1 | M2 | M30 | M60 => ModalGroup::MStop,
            M6 => ModalGroup::MToolChange,
            M3 | M4 | M5 => ModalGroup::MSpindle,
            M7 | M8 | M9 => ModalGroup::MCoolant,
            M48 | M49 => ModalGroup::MOverride,
        }
    }
}

impl fmt::Display for MCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
