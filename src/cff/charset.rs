//! CFF Charset formats 0/1/2 (§4.8): glyph-index ↔ SID mapping, used to
//! resolve glyph names to glyph indices (C8).

use crate::error::Result;
use crate::parser::{FromData, LazyArray16, Stream};
use crate::GlyphId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct StringId(pub u16);

impl FromData for StringId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        StringId(u16::parse(data))
    }
}

#[derive(Clone, Copy, Debug)]
struct Format1Range {
    first: StringId,
    left: u8,
}

impl FromData for Format1Range {
    const SIZE: usize = 3;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = crate::parser::SafeStream::new(data);
        Format1Range { first: s.read(), left: s.read() }
    }
}

#[derive(Clone, Copy, Debug)]
struct Format2Range {
    first: StringId,
    left: u16,
}

impl FromData for Format2Range {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = crate::parser::SafeStream::new(data);
        Format2Range { first: s.read(), left: s.read() }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Charset<'a> {
    IsoAdobe,
    Expert,
    ExpertSubset,
    Format0(LazyArray16<'a, StringId>),
    Format1(LazyArray16<'a, Format1Range>),
    Format2(LazyArray16<'a, Format2Range>),
}

impl<'a> Charset<'a> {
    pub fn sid_to_gid(&self, sid: StringId) -> Option<GlyphId> {
        if sid.0 == 0 {
            return Some(GlyphId(0));
        }

        match self {
            Charset::IsoAdobe | Charset::Expert | Charset::ExpertSubset => None,
            Charset::Format0(array) => {
                array.iter().position(|n| n == sid).map(|n| GlyphId(n as u16 + 1))
            }
            Charset::Format1(array) => {
                let mut glyph_id = 1u16;
                for range in array.iter() {
                    let last = u32::from(range.first.0) + u32::from(range.left);
                    if range.first <= sid && u32::from(sid.0) <= last {
                        return Some(GlyphId(glyph_id + (sid.0 - range.first.0)));
                    }
                    glyph_id += u16::from(range.left) + 1;
                }
                None
            }
            Charset::Format2(array) => {
                let mut glyph_id = 1u16;
                for range in array.iter() {
                    let last = u32::from(range.first.0) + u32::from(range.left);
                    if range.first <= sid && u32::from(sid.0) <= last {
                        return Some(GlyphId(glyph_id + (sid.0 - range.first.0)));
                    }
                    glyph_id += range.left + 1;
                }
                None
            }
        }
    }
}

pub fn parse_charset<'a>(number_of_glyphs: u16, s: &mut Stream<'a>) -> Result<Charset<'a>> {
    if number_of_glyphs < 2 {
        // Only `.notdef`; there is nothing else to map.
        return Ok(Charset::Format0(LazyArray16::new(&[], 0)));
    }

    let format: u8 = s.read()?;
    match format {
        0 => Ok(Charset::Format0(s.read_array16(number_of_glyphs - 1)?)),
        1 => {
            let mut count = 0u16;
            {
                let mut probe = *s;
                let mut total_left = number_of_glyphs - 1;
                while total_left > 0 {
                    probe.skip::<StringId>()?;
                    let left: u8 = probe.read()?;
                    total_left = total_left.saturating_sub(u16::from(left) + 1);
                    count += 1;
                }
            }
            Ok(Charset::Format1(s.read_array16(count)?))
        }
        2 => {
            let mut count = 0u16;
            {
                let mut probe = *s;
                let mut total_left = number_of_glyphs - 1;
                while total_left > 0 {
                    probe.skip::<StringId>()?;
                    let left: u16 = probe.read()?;
                    total_left = total_left.saturating_sub(left + 1);
                    count += 1;
                }
            }
            Ok(Charset::Format2(s.read_array16(count)?))
        }
        _ => Err(crate::error::DecodeError::UnsupportedFormat("cff.charset.format")),
    }
}
