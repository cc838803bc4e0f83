// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
//
// C4: character-to-glyph mapping. Format-specific decoding lives in the
// sibling `format*` modules; this file owns sub-table enumeration and
// preferred-encoding selection.

mod format0;
mod format2;
mod format4;
mod format6;
mod format10;
mod format12_13;

use crate::error::{DecodeError, Result};
use crate::parser::{FromData, LazyArray16, Stream};

#[derive(Clone, Copy, Debug)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    offset: u32,
}

impl FromData for EncodingRecord {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = crate::parser::SafeStream::new(data);
        EncodingRecord { platform_id: s.read(), encoding_id: s.read(), offset: s.read() }
    }
}

/// Preferred sub-table selection order (first match wins), §4.4.
const PRIORITY: &[(u16, u16)] =
    &[(3, 10), (0, 4), (0, 6), (3, 1), (0, 3), (0, 2), (0, 1), (0, 0)];

/// Decoded `cmap` directory (C4).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    data: &'a [u8],
    records: LazyArray16<'a, EncodingRecord>,
}

pub fn parse(data: &[u8]) -> Result<Table> {
    let mut s = Stream::new(data);
    let version: u16 = s.read()?;
    if version != 0 {
        return Err(DecodeError::UnsupportedFormat("cmap.version"));
    }
    let count: u16 = s.read()?;
    let records = s.read_array16::<EncodingRecord>(count)?;
    Ok(Table { data, records })
}

impl<'a> Table<'a> {
    fn preferred_subtable(&self) -> Option<(EncodingRecord, &'a [u8])> {
        let find = |platform_id: u16, encoding_id: u16| {
            self.records
                .iter()
                .find(|r| r.platform_id == platform_id && r.encoding_id == encoding_id)
        };

        let rec = PRIORITY
            .iter()
            .find_map(|&(p, e)| find(p, e))
            .or_else(|| self.records.iter().next())?;

        let sub_data = self.data.get(rec.offset as usize..)?;
        Some((rec, sub_data))
    }

    /// Maps a character code to a glyph index; 0 (`.notdef`) if unmapped or
    /// if the font has no usable cmap sub-table.
    pub fn glyph_id_for(&self, code: u32) -> Result<u16> {
        let (_, sub_data) = match self.preferred_subtable() {
            Some(v) => v,
            None => return Ok(0),
        };

        let format: u16 = Stream::read_at(sub_data, 0)?;
        match format {
            0 => format0::lookup(sub_data, code),
            2 => format2::lookup(sub_data, code),
            4 => format4::lookup(sub_data, code),
            6 => format6::lookup(sub_data, code),
            10 => format10::lookup(sub_data, code),
            12 => format12_13::lookup(sub_data, code, true),
            13 => format12_13::lookup(sub_data, code, false),
            14 => Ok(0), // variation-selector sub-table; parsed, not resolved here
            _ => Err(DecodeError::UnsupportedFormat("cmap.subtable.format")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_subtable(format_bytes: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes()); // version
        data.extend_from_slice(&1u16.to_be_bytes()); // numTables
        data.extend_from_slice(&3u16.to_be_bytes()); // platformID windows
        data.extend_from_slice(&1u16.to_be_bytes()); // encodingID BMP
        data.extend_from_slice(&12u32.to_be_bytes()); // offset
        data.extend_from_slice(format_bytes);
        data
    }

    #[test]
    fn format4_single_segment() {
        // S1 scenario: A-Z -> glyph 100
        let mut sub = Vec::new();
        sub.extend_from_slice(&4u16.to_be_bytes()); // format
        sub.extend_from_slice(&0u16.to_be_bytes()); // length (unused)
        sub.extend_from_slice(&0u16.to_be_bytes()); // language
        sub.extend_from_slice(&4u16.to_be_bytes()); // segCountX2 (2 segments incl. terminator)
        sub.extend_from_slice(&0u16.to_be_bytes()); // searchRange
        sub.extend_from_slice(&0u16.to_be_bytes()); // entrySelector
        sub.extend_from_slice(&0u16.to_be_bytes()); // rangeShift
        // endCode[]
        sub.extend_from_slice(&0x005Au16.to_be_bytes());
        sub.extend_from_slice(&0xFFFFu16.to_be_bytes());
        sub.extend_from_slice(&0u16.to_be_bytes()); // reservedPad
        // startCode[]
        sub.extend_from_slice(&0x0041u16.to_be_bytes());
        sub.extend_from_slice(&0xFFFFu16.to_be_bytes());
        // idDelta[]
        sub.extend_from_slice(&63i16.to_be_bytes());
        sub.extend_from_slice(&1i16.to_be_bytes());
        // idRangeOffset[]
        sub.extend_from_slice(&0u16.to_be_bytes());
        sub.extend_from_slice(&0u16.to_be_bytes());

        let data = wrap_subtable(&sub);
        let table = parse(&data).unwrap();
        assert_eq!(table.glyph_id_for(0x41).unwrap(), 100);
        assert_eq!(table.glyph_id_for(0x5A).unwrap(), 125);
        assert_eq!(table.glyph_id_for(0x40).unwrap(), 0);
    }
}
