// https://docs.microsoft.com/en-us/typography/opentype/spec/post

use crate::error::{DecodeError, Result};
use crate::parser::Stream;

const TABLE_SIZE: usize = 32;

/// Underline metrics from the `post` table header (SPEC_FULL.md §F.1).
/// Glyph-name resolution (`post` formats 2.0's name array) is out of scope
/// per the source specification's Non-goals.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub version: f32,
    pub italic_angle: f32,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: bool,
}

pub fn parse(data: &[u8]) -> Result<Table> {
    if data.len() < TABLE_SIZE {
        return Err(DecodeError::Truncated { need: TABLE_SIZE, have: data.len(), at: 0 });
    }

    let mut s = Stream::new(data);
    let version = s.read::<crate::parser::Fixed>()?.0;
    let italic_angle = s.read::<crate::parser::Fixed>()?.0;
    let underline_position: i16 = s.read()?;
    let underline_thickness: i16 = s.read()?;
    let is_fixed_pitch: u32 = s.read()?;

    Ok(Table {
        version,
        italic_angle,
        underline_position,
        underline_thickness,
        is_fixed_pitch: is_fixed_pitch != 0,
    })
}
