// https://docs.microsoft.com/en-us/typography/opentype/spec/maxp

use crate::error::{DecodeError, Result};
use crate::parser::Stream;

/// `maxp` version 1.0 is fully parsed; version 0.5 leaves the extra fields
/// at zero (§4.3).
pub fn parse(data: &[u8]) -> Result<u16> {
    let mut s = Stream::new(data);
    let version: u32 = s.read()?;
    if version != 0x0000_5000 && version != 0x0001_0000 {
        return Err(DecodeError::UnsupportedFormat("maxp.version"));
    }
    s.read()
}
