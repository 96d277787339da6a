//! The parsed representation of one program line.

use crate::taxonomy::{GCode, Letter, MCode, ModalGroup, WordMap};

/// One parsed line of a part program.
///
/// `Block` is produced by a parser external to this crate and is immutable
/// except for its resolved axis vector, which the execution engine fills in
/// during its phase-19/20 prelude (see [`crate::engine`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    words: [f64; 26],
    present: WordMap,
    gcodes: Vec<GCode>,
    mcodes: Vec<MCode>,
    /// Resolved X,Y,Z,A,B,C target, filled in by the execution engine.
    pub axis: [f64; 6],
    /// Trailing comment text, if any. A `MSG,` prefix (case-insensitive,
    /// optional following space) marks it as a machine-visible message
    /// rather than a developer comment.
    pub comment: Option<String>,
}

/// The machine-visible-vs-developer classification of a block's comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// A `(MSG, ...)` comment, meant to be surfaced to the operator.
    Message,
    /// An ordinary developer comment with no machine-visible meaning.
    Plain,
}

impl Block {
    /// An empty block with no words, codes, or comment set.
    pub fn new() -> Self {
        Block::default()
    }

    /// Record that `letter` was explicitly present with value `value`.
    pub fn set_word(&mut self, letter: Letter, value: f64) {
        self.words[letter as usize] = value;
        self.present |= letter.mask();
    }

    /// True if `letter` was explicitly present in the source line.
    pub fn has(&self, letter: Letter) -> bool {
        self.present.contains(letter.mask())
    }

    /// The numeric value of `letter`, or `0.0` if it was not present.
    pub fn word(&self, letter: Letter) -> f64 {
        self.words[letter as usize]
    }

    /// The bitmap of every letter present in this block.
    pub fn present(&self) -> WordMap {
        self.present
    }

    /// Assign a G-code to this block. A block may carry at most one code
    /// per modal group; this replaces any code already recorded for the
    /// same group as `code`.
    pub fn set_gcode(&mut self, code: GCode) {
        self.gcodes.retain(|c| c.group() != code.group());
        self.gcodes.push(code);
    }

    /// Assign an M-code to this block (see [`Block::set_gcode`]).
    ///
    /// M7 and M8 (mist and flood coolant) are grouped together for table
    /// purposes but may be simultaneously active, so they are not
    /// mutually exclusive the way the rest of a modal group is: M9
    /// clears both, but setting one does not clear the other.
    pub fn set_mcode(&mut self, code: MCode) {
        use MCode::*;
        match code {
            M7 | M8 => {
                self.mcodes.retain(|c| *c != code);
                self.mcodes.push(code);
            }
            M9 => {
                self.mcodes.retain(|c| !matches!(c, M7 | M8 | M9));
                self.mcodes.push(M9);
            }
            _ => {
                self.mcodes.retain(|c| c.group() != code.group());
                self.mcodes.push(code);
            }
        }
    }

    /// The G-code active for `group` in this block, if any.
    pub fn gcode_in(&self, group: ModalGroup) -> Option<GCode> {
        self.gcodes.iter().copied().find(|c| c.group() == group)
    }

    /// The M-code active for `group` in this block, if any.
    pub fn mcode_in(&self, group: ModalGroup) -> Option<MCode> {
        self.mcodes.iter().copied().find(|c| c.group() == group)
    }

    /// Every G-code active in this block, across all groups.
    pub fn gcodes(&self) -> &[GCode] {
        &self.gcodes
    }

    /// Every M-code active in this block, across all groups.
    pub fn mcodes(&self) -> &[MCode] {
        &self.mcodes
    }

    /// True if `code` is active anywhere in this block.
    pub fn has_gcode(&self, code: GCode) -> bool {
        self.gcodes.contains(&code)
    }

    /// True if `code` is active anywhere in this block.
    pub fn has_mcode(&self, code: MCode) -> bool {
        self.mcodes.contains(&code)
    }

    /// True if this block carries any group-1 (motion) code.
    pub fn has_motion(&self) -> bool {
        self.gcode_in(ModalGroup::Motion).is_some()
    }

    /// The kind of comment this block carries, if any.
    pub fn comment_kind(&self) -> Option<CommentKind> {
        self.comment.as_deref().map(|text| {
            let trimmed = text.trim_start();
            let lower: String = trimmed.chars().take(4).collect::<String>().to_lowercase();
            if lower.starts_with("msg,") {
                CommentKind::Message
            } else {
                CommentKind::Plain
            }
        })
    }

    /// The comment text with a `MSG,` prefix stripped, if this is a
    /// machine-visible message.
    pub fn message_text(&self) -> Option<&str> {
        match self.comment_kind() {
            Some(CommentKind::Message) => {
                let text = self.comment.as_deref().unwrap_or_default();
                let trimmed = text.trim_start();
                let rest = &trimmed[4..];
                Some(rest.trim_start())
            }
            _ => None,
        }
    }
}
