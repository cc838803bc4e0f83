// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping

use crate::error::Result;
use crate::parser::Stream;

/// Format 6: `(firstCode, entryCount, glyphIdArray)` (§4.4).
pub fn lookup(data: &[u8], code: u32) -> Result<u16> {
    let mut s = Stream::new(data);
    s.skip::<u16>()?; // format
    s.skip::<u16>()?; // length
    s.skip::<u16>()?; // language
    let first_code: u16 = s.read()?;
    let entry_count: u16 = s.read()?;

    if code > 0xFFFF {
        return Ok(0);
    }
    let code = code as u16;
    if code < first_code || code >= first_code.saturating_add(entry_count) {
        return Ok(0);
    }

    let index = code - first_code;
    Stream::read_at(data, s.position() + usize::from(index) * 2)
}
