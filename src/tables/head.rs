// https://docs.microsoft.com/en-us/typography/opentype/spec/head

use crate::error::{DecodeError, Result};
use crate::parser::Stream;

const TABLE_SIZE: usize = 54;
const FONT_REVISION_OFFSET: usize = 4;
const MAGIC_NUMBER_OFFSET: usize = 12;
const MAC_STYLE_OFFSET: usize = 16;
const UNITS_PER_EM_OFFSET: usize = 18;
const BBOX_OFFSET: usize = 36;
const INDEX_TO_LOC_FORMAT_OFFSET: usize = 50;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexToLocationFormat {
    Short,
    Long,
}

/// macStyle bit positions (§4.3).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MacStyle(pub u16);

impl MacStyle {
    pub fn is_bold(self) -> bool {
        self.0 & (1 << 0) != 0
    }
    pub fn is_italic(self) -> bool {
        self.0 & (1 << 1) != 0
    }
    pub fn is_underline(self) -> bool {
        self.0 & (1 << 2) != 0
    }
    pub fn is_outline(self) -> bool {
        self.0 & (1 << 3) != 0
    }
    pub fn is_shadow(self) -> bool {
        self.0 & (1 << 4) != 0
    }
    pub fn is_condensed(self) -> bool {
        self.0 & (1 << 5) != 0
    }
    pub fn is_extended(self) -> bool {
        self.0 & (1 << 6) != 0
    }
}

/// Decoded `head` table (C3 / `FontHeader`).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub font_revision: f32,
    pub magic_number: u32,
    pub mac_style: MacStyle,
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub index_to_loc_format: IndexToLocationFormat,
}

pub fn parse(data: &[u8]) -> Result<Table> {
    if data.len() < TABLE_SIZE {
        return Err(DecodeError::Truncated { need: TABLE_SIZE, have: data.len(), at: 0 });
    }

    let font_revision = Stream::read_at::<crate::parser::Fixed>(data, FONT_REVISION_OFFSET)?.0;
    let magic_number: u32 = Stream::read_at(data, MAGIC_NUMBER_OFFSET)?;
    let mac_style = MacStyle(Stream::read_at(data, MAC_STYLE_OFFSET)?);

    let units_per_em: u16 = Stream::read_at(data, UNITS_PER_EM_OFFSET)?;
    if !(16..=16384).contains(&units_per_em) {
        return Err(DecodeError::CffStructure("head.unitsPerEm out of [16, 16384]"));
    }

    let mut s = Stream::new_at(data, BBOX_OFFSET)?;
    let x_min: i16 = s.read()?;
    let y_min: i16 = s.read()?;
    let x_max: i16 = s.read()?;
    let y_max: i16 = s.read()?;

    let raw_format: i16 = Stream::read_at(data, INDEX_TO_LOC_FORMAT_OFFSET)?;
    let index_to_loc_format = match raw_format {
        0 => IndexToLocationFormat::Short,
        1 => IndexToLocationFormat::Long,
        _ => return Err(DecodeError::UnsupportedFormat("head.indexToLocFormat")),
    };

    Ok(Table {
        font_revision,
        magic_number,
        mac_style,
        units_per_em,
        x_min,
        y_min,
        x_max,
        y_max,
        index_to_loc_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut v = vec![0u8; TABLE_SIZE];
        v[UNITS_PER_EM_OFFSET..UNITS_PER_EM_OFFSET + 2].copy_from_slice(&2048u16.to_be_bytes());
        v[MAC_STYLE_OFFSET..MAC_STYLE_OFFSET + 2].copy_from_slice(&0b11u16.to_be_bytes());
        v[INDEX_TO_LOC_FORMAT_OFFSET..INDEX_TO_LOC_FORMAT_OFFSET + 2]
            .copy_from_slice(&1i16.to_be_bytes());
        v
    }

    #[test]
    fn parses_units_per_em_and_style() {
        let data = sample();
        let t = parse(&data).unwrap();
        assert_eq!(t.units_per_em, 2048);
        assert!(t.mac_style.is_bold());
        assert!(t.mac_style.is_italic());
        assert!(!t.mac_style.is_underline());
        assert_eq!(t.index_to_loc_format, IndexToLocationFormat::Long);
    }

    #[test]
    fn rejects_units_per_em_out_of_range() {
        let mut data = sample();
        data[UNITS_PER_EM_OFFSET..UNITS_PER_EM_OFFSET + 2].copy_from_slice(&1u16.to_be_bytes());
        assert!(parse(&data).is_err());
    }
}
