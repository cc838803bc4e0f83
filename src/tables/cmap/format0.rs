// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table

use crate::error::Result;
use crate::parser::Stream;

/// Format 0: 256-entry byte→glyph mapping (§4.4).
pub fn lookup(data: &[u8], code: u32) -> Result<u16> {
    if code > 255 {
        return Ok(0);
    }
    let glyph: u8 = Stream::read_at(data, 6 + code as usize)?;
    Ok(u16::from(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_byte_code() {
        let mut data = vec![0u8; 6 + 256];
        data[6 + 0x41] = 42;
        assert_eq!(lookup(&data, 0x41).unwrap(), 42);
        assert_eq!(lookup(&data, 0x100).unwrap(), 0);
    }
}
