// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-10-trimmed-array

use crate::error::Result;
use crate::parser::Stream;

/// Format 10: 32-bit analogue of format 6 (§4.4).
pub fn lookup(data: &[u8], code: u32) -> Result<u16> {
    let mut s = Stream::new(data);
    s.skip::<u16>()?; // format
    s.skip::<u16>()?; // reserved
    s.skip::<u32>()?; // length
    s.skip::<u32>()?; // language
    let start_char_code: u32 = s.read()?;
    let num_chars: u32 = s.read()?;

    if code < start_char_code || code >= start_char_code.saturating_add(num_chars) {
        return Ok(0);
    }

    let index = code - start_char_code;
    Stream::read_at(data, s.position() + index as usize * 2)
}
