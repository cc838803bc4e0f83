// https://docs.microsoft.com/en-us/typography/opentype/spec/hhea

use crate::error::{DecodeError, Result};
use crate::parser::Stream;

pub const TABLE_SIZE: usize = 36;

/// Decoded `hhea` table (C3 / `HorizontalHeader`).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub number_of_h_metrics: u16,
}

pub fn parse(data: &[u8]) -> Result<Table> {
    if data.len() < TABLE_SIZE {
        return Err(DecodeError::Truncated { need: TABLE_SIZE, have: data.len(), at: 0 });
    }

    let mut s = Stream::new(data);
    s.skip::<crate::parser::Fixed>()?; // version
    let ascender: i16 = s.read()?;
    let descender: i16 = s.read()?;
    let line_gap: i16 = s.read()?;
    let advance_width_max: u16 = s.read()?;
    s.advance(22)?; // minLsb/minRsb/xMaxExtent/caretSlope*2/caretOffset/reserved*4/metricDataFormat
    let number_of_h_metrics: u16 = s.read()?;

    Ok(Table { ascender, descender, line_gap, advance_width_max, number_of_h_metrics })
}
