// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-2-high-byte-mapping-through-table

use crate::error::Result;
use crate::parser::{LazyArray16, Stream};

/// Format 2: mixed 1-/2-byte legacy CJK mapping (§4.4).
pub fn lookup(data: &[u8], code: u32) -> Result<u16> {
    if code > 0xFFFF {
        return Ok(0);
    }

    let mut s = Stream::new(data);
    s.skip::<u16>()?; // format
    s.skip::<u16>()?; // length
    s.skip::<u16>()?; // language
    let sub_header_keys: LazyArray16<u16> = s.read_array16(256)?;
    let sub_headers_start = s.position();

    let high_byte = ((code >> 8) & 0xFF) as u16;
    let low_byte = (code & 0xFF) as u16;

    let index = if high_byte == 0 { 0 } else { sub_header_keys.get(high_byte).unwrap_or(0) / 8 };
    let rec_offset = sub_headers_start + usize::from(index) * 8;

    let first_code: u16 = Stream::read_at(data, rec_offset)?;
    let entry_count: u16 = Stream::read_at(data, rec_offset + 2)?;
    let id_delta: i16 = Stream::read_at(data, rec_offset + 4)?;
    let id_range_offset: u16 = Stream::read_at(data, rec_offset + 6)?;
    let id_range_offset_pos = rec_offset + 6;

    if low_byte < first_code || low_byte >= first_code.saturating_add(entry_count) {
        return Ok(0);
    }

    let glyph_pos = id_range_offset_pos
        + usize::from(id_range_offset)
        + usize::from(low_byte - first_code) * 2;
    let glyph: u16 = Stream::read_at(data, glyph_pos)?;
    if glyph == 0 {
        return Ok(0);
    }

    Ok(((i32::from(glyph) + i32::from(id_delta)) & 0xFFFF) as u16)
}
