// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values

use crate::error::Result;
use crate::parser::{LazyArray16, Stream};

/// Format 4: segmented BMP mapping (§4.4, testable property 2).
pub fn lookup(data: &[u8], code: u32) -> Result<u16> {
    if code > 0xFFFF {
        return Ok(0);
    }
    let code = code as u16;

    let mut s = Stream::new(data);
    s.skip::<u16>()?; // format
    s.skip::<u16>()?; // length
    s.skip::<u16>()?; // language
    let seg_count_x2: u16 = s.read()?;
    let seg_count = seg_count_x2 / 2;
    s.skip::<u16>()?; // searchRange
    s.skip::<u16>()?; // entrySelector
    s.skip::<u16>()?; // rangeShift

    let end_codes: LazyArray16<u16> = s.read_array16(seg_count)?;
    s.skip::<u16>()?; // reservedPad
    let start_codes: LazyArray16<u16> = s.read_array16(seg_count)?;
    let id_deltas: LazyArray16<i16> = s.read_array16(seg_count)?;
    let id_range_offsets_pos = s.position();
    let id_range_offsets: LazyArray16<u16> = s.read_array16(seg_count)?;

    for i in 0..seg_count {
        let end = match end_codes.get(i) {
            Some(v) => v,
            None => break,
        };
        if end < code {
            continue;
        }

        let start = start_codes.get(i).unwrap_or(0);
        if code < start {
            return Ok(0);
        }

        let delta = id_deltas.get(i).unwrap_or(0);
        let range_offset = id_range_offsets.get(i).unwrap_or(0);

        if range_offset == 0 {
            return Ok(code.wrapping_add(delta as u16));
        }

        let glyph_pos = id_range_offsets_pos
            + usize::from(i) * 2
            + usize::from(range_offset)
            + usize::from(code - start) * 2;
        let glyph: u16 = Stream::read_at(data, glyph_pos)?;
        if glyph == 0 {
            return Ok(0);
        }
        return Ok(glyph.wrapping_add(delta as u16));
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surjectivity_outside_segments() {
        let mut data = Vec::new();
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&4u16.to_be_bytes()); // segCountX2 = 2 segs
        data.extend_from_slice(&[0u8; 6]); // searchRange/entrySelector/rangeShift
        data.extend_from_slice(&0x005Au16.to_be_bytes());
        data.extend_from_slice(&0xFFFFu16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0x0041u16.to_be_bytes());
        data.extend_from_slice(&0xFFFFu16.to_be_bytes());
        data.extend_from_slice(&63i16.to_be_bytes());
        data.extend_from_slice(&1i16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());

        assert_eq!(lookup(&data, 0x30).unwrap(), 0);
        assert_eq!(lookup(&data, 0x41).unwrap(), 100);
    }
}
