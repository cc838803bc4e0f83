// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage
// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-13-many-to-one-range-mappings

use crate::error::Result;
use crate::parser::Stream;

/// Format 12 (`sequential`) and format 13 (`constant`) sequential groups
/// `(startCharCode, endCharCode, startGlyphID)` (§4.4, S2 scenario).
pub fn lookup(data: &[u8], code: u32, sequential: bool) -> Result<u16> {
    let mut s = Stream::new(data);
    s.skip::<u16>()?; // format
    s.skip::<u16>()?; // reserved
    s.skip::<u32>()?; // length
    s.skip::<u32>()?; // language
    let num_groups: u32 = s.read()?;

    for _ in 0..num_groups {
        let start_char_code: u32 = s.read()?;
        let end_char_code: u32 = s.read()?;
        let start_glyph_id: u32 = s.read()?;

        if code >= start_char_code && code <= end_char_code {
            let glyph = if sequential {
                start_glyph_id + (code - start_char_code)
            } else {
                start_glyph_id
            };
            return Ok(glyph as u16);
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(start: u32, end: u32, glyph: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&12u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&start.to_be_bytes());
        data.extend_from_slice(&end.to_be_bytes());
        data.extend_from_slice(&glyph.to_be_bytes());
        data
    }

    #[test]
    fn sequential_vs_constant() {
        let data = group(0x41, 0x45, 200);
        assert_eq!(lookup(&data, 0x41, true).unwrap(), 200);
        assert_eq!(lookup(&data, 0x45, true).unwrap(), 204);
        assert_eq!(lookup(&data, 0x41, false).unwrap(), 200);
        assert_eq!(lookup(&data, 0x45, false).unwrap(), 200);
    }
}
