// https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx

use crate::error::Result;
use crate::parser::{FromData, LazyArray16, Stream};
use crate::GlyphId;

#[derive(Clone, Copy, Debug)]
struct LongHorMetric {
    advance_width: u16,
    lsb: i16,
}

impl FromData for LongHorMetric {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = crate::parser::SafeStream::new(data);
        LongHorMetric { advance_width: s.read(), lsb: s.read() }
    }
}

/// Decoded `hmtx` table (C3 / `HorizontalMetrics`).
///
/// "Long metrics then bare LSBs" compression: entries `[0, number_of_h_metrics)`
/// carry both fields; entries beyond that only carry an LSB and inherit the
/// final long entry's advance width (§4.3, testable property 3).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    long_metrics: LazyArray16<'a, LongHorMetric>,
    bare_lsbs: LazyArray16<'a, i16>,
    num_glyphs: u16,
}

pub fn parse<'a>(data: &'a [u8], number_of_h_metrics: u16, num_glyphs: u16) -> Result<Table<'a>> {
    let mut s = Stream::new(data);
    let long_metrics = s.read_array16::<LongHorMetric>(number_of_h_metrics)?;
    let remaining = num_glyphs.saturating_sub(number_of_h_metrics);
    let bare_lsbs = s.read_array16::<i16>(remaining)?;
    Ok(Table { long_metrics, bare_lsbs, num_glyphs })
}

impl<'a> Table<'a> {
    /// Returns 0 for `gid >= num_glyphs` (§4.3).
    pub fn advance_width(&self, glyph_id: GlyphId) -> u16 {
        let gid = glyph_id.0;
        if gid >= self.num_glyphs {
            return 0;
        }
        if let Some(last) = self.long_metrics.last() {
            if gid < self.long_metrics.len() {
                return self.long_metrics.get(gid).map(|m| m.advance_width).unwrap_or(0);
            }
            return last.advance_width;
        }
        0
    }

    pub fn left_side_bearing(&self, glyph_id: GlyphId) -> i16 {
        let gid = glyph_id.0;
        if gid >= self.num_glyphs {
            return 0;
        }
        if gid < self.long_metrics.len() {
            return self.long_metrics.get(gid).map(|m| m.lsb).unwrap_or(0);
        }
        self.bare_lsbs.get(gid - self.long_metrics.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherits_last_advance_width() {
        // two long metrics, then two bare LSBs (numGlyphs = 4, numberOfHMetrics = 2)
        let mut data = Vec::new();
        data.extend_from_slice(&100u16.to_be_bytes());
        data.extend_from_slice(&(-5i16).to_be_bytes());
        data.extend_from_slice(&200u16.to_be_bytes());
        data.extend_from_slice(&(-1i16).to_be_bytes());
        data.extend_from_slice(&7i16.to_be_bytes());
        data.extend_from_slice(&9i16.to_be_bytes());

        let table = parse(&data, 2, 4).unwrap();
        assert_eq!(table.advance_width(GlyphId(2)), 200);
        assert_eq!(table.advance_width(GlyphId(3)), 200);
        assert_eq!(table.left_side_bearing(GlyphId(2)), 7);
        assert_eq!(table.left_side_bearing(GlyphId(3)), 9);
        assert_eq!(table.advance_width(GlyphId(10)), 0);
    }
}
