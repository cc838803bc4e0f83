// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
//
// C5 (simple glyph decode) + C6 (composite glyph resolution).

#[cfg(feature = "std")]
use std::vec::Vec;

use crate::error::{DecodeError, Result};
use crate::outline::{Contour, GlyphOutline, GlyphMetrics, Transform};
use crate::parser::Stream;
use crate::tables::loca;
use crate::GlyphId;

/// Bounded per §4.6 / §5: defeats malicious composite-glyph cycles.
const MAX_COMPONENT_DEPTH: u8 = 16;

const ON_CURVE_POINT: u8 = 0x01;
const X_SHORT_VECTOR: u8 = 0x02;
const Y_SHORT_VECTOR: u8 = 0x04;
const REPEAT_FLAG: u8 = 0x08;
const X_IS_SAME_OR_POSITIVE: u8 = 0x10;
const Y_IS_SAME_OR_POSITIVE: u8 = 0x20;

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

#[derive(Clone, Copy, Debug)]
struct GlyphHeader {
    number_of_contours: i16,
    x_min: i16,
    y_min: i16,
    x_max: i16,
    y_max: i16,
}

fn parse_header(s: &mut Stream) -> Result<GlyphHeader> {
    Ok(GlyphHeader {
        number_of_contours: s.read()?,
        x_min: s.read()?,
        y_min: s.read()?,
        x_max: s.read()?,
        y_max: s.read()?,
    })
}

/// `glyf`/`loca` glyph outline resolver.
pub struct GlyfTable<'a> {
    glyf_data: &'a [u8],
    loca: loca::Table<'a>,
}

impl<'a> GlyfTable<'a> {
    pub fn new(glyf_data: &'a [u8], loca: loca::Table<'a>) -> Self {
        GlyfTable { glyf_data, loca }
    }

    fn glyph_data(&self, glyph_id: GlyphId) -> Result<Option<&'a [u8]>> {
        match self.loca.glyph_range(glyph_id)? {
            Some(range) => self
                .glyf_data
                .get(range)
                .map(Some)
                .ok_or(DecodeError::Truncated { need: 0, have: 0, at: 0 }),
            None => Ok(None),
        }
    }

    #[cfg(feature = "std")]
    pub fn outline(&self, glyph_id: GlyphId) -> Result<Option<GlyphOutline>> {
        let data = match self.glyph_data(glyph_id)? {
            Some(d) => d,
            None => return Ok(Some(GlyphOutline::empty(glyph_id))),
        };

        let mut s = Stream::new(data);
        let header = parse_header(&mut s)?;

        let mut contours = Vec::new();
        let mut component_ids = Vec::new();
        let is_composite = header.number_of_contours < 0;

        if header.number_of_contours >= 0 {
            parse_simple_contours(&mut s, header.number_of_contours as u16, &mut contours)?;
        } else {
            self.parse_composite(&mut s, Transform::default(), 0, &mut contours, &mut component_ids)?;
        }

        Ok(Some(GlyphOutline {
            glyph_id: u32::from(glyph_id.0),
            contours,
            metrics: GlyphMetrics {
                advance_width: 0,
                lsb: 0,
                x_min: header.x_min,
                y_min: header.y_min,
                x_max: header.x_max,
                y_max: header.y_max,
            },
            is_composite,
            component_ids,
        }))
    }

    #[cfg(feature = "std")]
    fn parse_composite(
        &self,
        s: &mut Stream,
        parent_transform: Transform,
        depth: u8,
        out_contours: &mut Vec<Contour>,
        out_component_ids: &mut Vec<u32>,
    ) -> Result<()> {
        if depth >= MAX_COMPONENT_DEPTH {
            return Err(DecodeError::CompositeCycle);
        }

        loop {
            let flags: u16 = s.read()?;
            let glyph_index: u16 = s.read()?;

            let (dx, dy) = if flags & ARG_1_AND_2_ARE_WORDS != 0 {
                let a: i16 = s.read()?;
                let b: i16 = s.read()?;
                (a, b)
            } else {
                let a: i8 = s.read()?;
                let b: i8 = s.read()?;
                (i16::from(a), i16::from(b))
            };

            if flags & ARGS_ARE_XY_VALUES == 0 {
                return Err(DecodeError::UnsupportedCompositeAnchor);
            }

            let local = if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
                let a = s.read_f2d14()?;
                let b = s.read_f2d14()?;
                let c = s.read_f2d14()?;
                let d = s.read_f2d14()?;
                Transform::new(a, b, c, d, f32::from(dx), f32::from(dy))
            } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
                let sx = s.read_f2d14()?;
                let sy = s.read_f2d14()?;
                Transform::new(sx, 0.0, 0.0, sy, f32::from(dx), f32::from(dy))
            } else if flags & WE_HAVE_A_SCALE != 0 {
                let scale = s.read_f2d14()?;
                Transform::new(scale, 0.0, 0.0, scale, f32::from(dx), f32::from(dy))
            } else {
                Transform::new(1.0, 0.0, 0.0, 1.0, f32::from(dx), f32::from(dy))
            };

            let combined = local.combine(&parent_transform);

            out_component_ids.push(u32::from(glyph_index));

            let data = self.glyph_data(GlyphId(glyph_index))?;
            if let Some(data) = data {
                let mut cs = Stream::new(data);
                let header = parse_header(&mut cs)?;
                if header.number_of_contours >= 0 {
                    let mut raw = Vec::new();
                    parse_simple_contours(&mut cs, header.number_of_contours as u16, &mut raw)?;
                    for contour in raw {
                        let points = contour
                            .points
                            .into_iter()
                            .map(|(x, y, on)| {
                                let (tx, ty) = combined.apply_to(x as f32, y as f32);
                                (f64::from(tx), f64::from(ty), on)
                            })
                            .collect();
                        out_contours.push(Contour { points });
                    }
                } else {
                    self.parse_composite(&mut cs, combined, depth + 1, out_contours, out_component_ids)?;
                }
            }

            if flags & MORE_COMPONENTS == 0 {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
fn parse_simple_contours(s: &mut Stream, n_contours: u16, out: &mut Vec<Contour>) -> Result<()> {
    let mut end_pts = Vec::with_capacity(usize::from(n_contours));
    for _ in 0..n_contours {
        end_pts.push(s.read::<u16>()?);
    }
    let n_points = match end_pts.last() {
        Some(&last) => usize::from(last) + 1,
        None => 0,
    };

    let instruction_length: u16 = s.read()?;
    s.advance(usize::from(instruction_length))?;

    let mut flags = Vec::with_capacity(n_points);
    while flags.len() < n_points {
        let flag: u8 = s.read()?;
        flags.push(flag);
        if flag & REPEAT_FLAG != 0 {
            let repeat: u8 = s.read()?;
            for _ in 0..repeat {
                if flags.len() >= n_points {
                    break;
                }
                flags.push(flag);
            }
        }
    }

    let mut xs = Vec::with_capacity(n_points);
    let mut x = 0i32;
    for &flag in &flags {
        if flag & X_SHORT_VECTOR != 0 {
            let d: u8 = s.read()?;
            if flag & X_IS_SAME_OR_POSITIVE != 0 {
                x += i32::from(d);
            } else {
                x -= i32::from(d);
            }
        } else if flag & X_IS_SAME_OR_POSITIVE == 0 {
            let d: i16 = s.read()?;
            x += i32::from(d);
        }
        xs.push(x);
    }

    let mut ys = Vec::with_capacity(n_points);
    let mut y = 0i32;
    for &flag in &flags {
        if flag & Y_SHORT_VECTOR != 0 {
            let d: u8 = s.read()?;
            if flag & Y_IS_SAME_OR_POSITIVE != 0 {
                y += i32::from(d);
            } else {
                y -= i32::from(d);
            }
        } else if flag & Y_IS_SAME_OR_POSITIVE == 0 {
            let d: i16 = s.read()?;
            y += i32::from(d);
        }
        ys.push(y);
    }

    let mut start = 0usize;
    for &end in &end_pts {
        let end = usize::from(end);
        let mut points = Vec::with_capacity(end - start + 1);
        for i in start..=end {
            let on_curve = flags[i] & ON_CURVE_POINT != 0;
            points.push((f64::from(xs[i]), f64::from(ys[i]), on_curve));
        }
        out.push(Contour { points });
        start = end + 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::head::IndexToLocationFormat;

    fn triangle_glyph() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&1i16.to_be_bytes()); // numberOfContours
        data.extend_from_slice(&0i16.to_be_bytes()); // xMin
        data.extend_from_slice(&0i16.to_be_bytes()); // yMin
        data.extend_from_slice(&100i16.to_be_bytes()); // xMax
        data.extend_from_slice(&100i16.to_be_bytes()); // yMax
        data.extend_from_slice(&2u16.to_be_bytes()); // endPtsOfContours[0]
        data.extend_from_slice(&0u16.to_be_bytes()); // instructionLength
        data.push(0x01); // flag point0: on-curve
        data.push(0x01); // flag point1
        data.push(0x01); // flag point2
        // x: 0, 100, 50 as plain i16 deltas (no short vector flag set)
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&100i16.to_be_bytes());
        data.extend_from_slice(&(-50i16).to_be_bytes());
        // y: 0, 0, 100
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&100i16.to_be_bytes());
        data
    }

    #[test]
    fn simple_triangle_outline() {
        let glyph = triangle_glyph();
        let mut loca_data = Vec::new();
        loca_data.extend_from_slice(&0u32.to_be_bytes());
        loca_data.extend_from_slice(&(glyph.len() as u32).to_be_bytes());
        let loca = loca::parse(&loca_data, 1, IndexToLocationFormat::Long).unwrap();
        let table = GlyfTable::new(&glyph, loca);

        let outline = table.outline(GlyphId(0)).unwrap().unwrap();
        assert_eq!(outline.contours.len(), 1);
        assert_eq!(outline.contours[0].points.len(), 3);
        assert!(outline.contours[0].points.iter().all(|&(_, _, on)| on));
    }

    #[test]
    fn empty_glyph_returns_some_with_no_contours() {
        let glyph: Vec<u8> = Vec::new();
        let mut loca_data = Vec::new();
        loca_data.extend_from_slice(&0u32.to_be_bytes());
        loca_data.extend_from_slice(&0u32.to_be_bytes());
        let loca = loca::parse(&loca_data, 1, IndexToLocationFormat::Long).unwrap();
        let table = GlyfTable::new(&glyph, loca);

        let outline = table.outline(GlyphId(0)).unwrap().unwrap();
        assert!(outline.contours.is_empty());
    }
}
