// https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use core::ops::Range;

use crate::error::{DecodeError, Result};
use crate::parser::{LazyArray16, Stream};
use crate::tables::head::IndexToLocationFormat;
use crate::GlyphId;

/// Decoded `loca` table (C5 / `LocaTable`): `num_glyphs + 1` offsets into
/// `glyf`. Short-format entries are doubled on load (§4.5).
#[derive(Clone, Copy, Debug)]
pub enum Table<'a> {
    Short(LazyArray16<'a, u16>),
    Long(LazyArray16<'a, u32>),
}

pub fn parse(data: &[u8], num_glyphs: u16, format: IndexToLocationFormat) -> Result<Table> {
    let total = num_glyphs.checked_add(1).ok_or(DecodeError::BadLoca)?;
    let mut s = Stream::new(data);
    match format {
        IndexToLocationFormat::Short => Ok(Table::Short(s.read_array16(total)?)),
        IndexToLocationFormat::Long => Ok(Table::Long(s.read_array16(total)?)),
    }
}

impl<'a> Table<'a> {
    fn at(&self, index: u16) -> Option<u32> {
        match self {
            Table::Short(arr) => arr.get(index).map(|v| u32::from(v) * 2),
            Table::Long(arr) => arr.get(index),
        }
    }

    /// Returns `None` for an out-of-range glyph or an empty glyph (equal
    /// adjacent offsets); `Err(BadLoca)` when the table is non-monotonic.
    pub fn glyph_range(&self, glyph_id: GlyphId) -> Result<Option<Range<usize>>> {
        let gid = glyph_id.0;
        let start = match self.at(gid) {
            Some(v) => v,
            None => return Ok(None),
        };
        let end = match self.at(gid.wrapping_add(1)) {
            Some(v) => v,
            None => return Ok(None),
        };

        if start > end {
            return Err(DecodeError::BadLoca);
        }
        if start == end {
            return Ok(None);
        }

        Ok(Some(start as usize..end as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_format_doubles_offsets() {
        let mut data = Vec::new();
        for v in [0u16, 5, 5, 10] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let table = parse(&data, 3, IndexToLocationFormat::Short).unwrap();
        assert_eq!(table.glyph_range(GlyphId(0)).unwrap(), Some(0..10));
        assert_eq!(table.glyph_range(GlyphId(1)).unwrap(), None); // empty glyph
        assert_eq!(table.glyph_range(GlyphId(2)).unwrap(), Some(10..20));
    }

    #[test]
    fn non_monotonic_is_bad_loca() {
        let mut data = Vec::new();
        for v in [10u32, 5] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let table = parse(&data, 1, IndexToLocationFormat::Long).unwrap();
        assert!(table.glyph_range(GlyphId(0)).is_err());
    }
}
