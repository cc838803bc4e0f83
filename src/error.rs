//! Error taxonomy for the font-outline extraction core.
//!
//! Every decoder in this crate returns `Result<T, DecodeError>`; there are
//! no panics on hostile input that was accepted by [`crate::Font::parse`].

use core::fmt;

/// Everything that can go wrong while decoding a font.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    /// A reader tried to read past the end of a slice.
    Truncated {
        need: usize,
        have: usize,
        at: usize,
    },
    /// Unknown sfnt magic, or an unsupported cmap sub-table format.
    UnsupportedFormat(&'static str),
    /// `loca` offsets are non-monotonic or out of range.
    BadLoca,
    /// Composite glyph recursion exceeded the depth bound.
    CompositeCycle,
    /// A composite component's flags indicate point-index anchoring, which
    /// this core does not support.
    UnsupportedCompositeAnchor,
    /// CharString interpretation failed.
    CharString(CharStringError),
    /// CFF INDEX/DICT structural invariant violated.
    CffStructure(&'static str),
    /// Type 1 eexec/PFB framing was implausible.
    Type1Decrypt(&'static str),
    /// Internal marker: requested glyph index has no data in this table.
    /// Never escapes `Font::parse`; `outline()` maps it to `Ok(None)`.
    NoGlyph,
}

/// CharString VM failure kinds (C7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStringError {
    SubrOverflow,
    StackOverflow,
    StackUnderflow,
    UnknownOperator,
    InterpreterLimit,
    BadWidth,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Truncated { need, have, at } => write!(
                f,
                "attempted to read {} bytes at offset {} but only {} remain",
                need, at, have
            ),
            DecodeError::UnsupportedFormat(what) => write!(f, "unsupported format: {}", what),
            DecodeError::BadLoca => write!(f, "loca table is not monotonic"),
            DecodeError::CompositeCycle => write!(f, "composite glyph recursion bound exceeded"),
            DecodeError::UnsupportedCompositeAnchor => {
                write!(f, "composite component uses point-index anchoring, which is unsupported")
            }
            DecodeError::CharString(kind) => write!(f, "charstring error: {}", kind),
            DecodeError::CffStructure(what) => write!(f, "malformed CFF structure: {}", what),
            DecodeError::Type1Decrypt(what) => write!(f, "type 1 decryption failed: {}", what),
            DecodeError::NoGlyph => write!(f, "no data for requested glyph"),
        }
    }
}

impl fmt::Display for CharStringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CharStringError::SubrOverflow => "subroutine call stack overflow",
            CharStringError::StackOverflow => "argument stack overflow",
            CharStringError::StackUnderflow => "argument stack underflow",
            CharStringError::UnknownOperator => "unknown operator",
            CharStringError::InterpreterLimit => "interpreter step limit exceeded",
            CharStringError::BadWidth => "invalid width encoding",
        };
        write!(f, "{}", s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl std::error::Error for CharStringError {}

impl From<CharStringError> for DecodeError {
    fn from(e: CharStringError) -> Self {
        DecodeError::CharString(e)
    }
}

pub type Result<T> = core::result::Result<T, DecodeError>;
