//! Public outline types and the TrueType/CFF-to-`GlyphOutline` unifier (C10).

use crate::GlyphId;

#[cfg(feature = "std")]
use std::vec::Vec;

/// A point in font design units (or, post-scaling, user units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    fn extend(&mut self, p: Point) {
        self.x_min = self.x_min.min(p.x);
        self.y_min = self.y_min.min(p.y);
        self.x_max = self.x_max.max(p.x);
        self.y_max = self.y_max.max(p.y);
    }
}

/// A path command emitted by a CFF/Type 1 CharString or a TrueType contour
/// walk; `PathCommand` models absolute-delta cubic command streams, while
/// TrueType contours are modeled directly as point lists (see `Contour`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo { p: Point },
    LineTo { p: Point },
    CubicBezier { c1: Point, c2: Point, p: Point },
    Close,
}

/// Zero-allocation sink for outline emission, used by the CharString VM and
/// the `glyf` decoder so that callers who don't need an owned `GlyphOutline`
/// can render directly.
pub trait OutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
    fn close_path(&mut self);
}

/// An ordered, closed list of `(x, y, on_curve)` triples.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<(f64, f64, bool)>,
}

#[cfg(feature = "std")]
impl Contour {
    pub fn bbox(&self) -> Rect {
        let mut r = Rect {
            x_min: f64::MAX,
            y_min: f64::MAX,
            x_max: f64::MIN,
            y_max: f64::MIN,
        };
        for &(x, y, _) in &self.points {
            r.extend(Point::new(x, y));
        }
        if self.points.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}

/// Horizontal/vertical metrics and bounding box for a single glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    pub advance_width: u16,
    pub lsb: i16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

/// The public, owned outline of a single glyph (C10 output / data model).
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutline {
    pub glyph_id: u32,
    pub contours: Vec<Contour>,
    pub metrics: GlyphMetrics,
    pub is_composite: bool,
    pub component_ids: Vec<u32>,
}

#[cfg(feature = "std")]
impl GlyphOutline {
    pub fn empty(glyph_id: GlyphId) -> Self {
        GlyphOutline {
            glyph_id: u32::from(glyph_id.0),
            contours: Vec::new(),
            metrics: GlyphMetrics::default(),
            is_composite: false,
            component_ids: Vec::new(),
        }
    }

    /// Builds a `GlyphOutline` from a flat `PathCommand` stream (CFF/Type 1).
    pub fn from_path_commands(glyph_id: GlyphId, commands: &[PathCommand]) -> Self {
        let mut contours: Vec<Contour> = Vec::new();
        let mut current: Option<Contour> = None;

        for cmd in commands {
            match *cmd {
                PathCommand::MoveTo { p } => {
                    if let Some(c) = current.take() {
                        if !c.points.is_empty() {
                            contours.push(c);
                        }
                    }
                    current = Some(Contour { points: alloc_vec1((p.x, p.y, true)) });
                }
                PathCommand::LineTo { p } => {
                    if let Some(c) = current.as_mut() {
                        c.points.push((p.x, p.y, true));
                    }
                }
                PathCommand::CubicBezier { c1, c2, p } => {
                    if let Some(c) = current.as_mut() {
                        c.points.push((c1.x, c1.y, false));
                        c.points.push((c2.x, c2.y, false));
                        c.points.push((p.x, p.y, true));
                    }
                }
                PathCommand::Close => {
                    if let Some(c) = current.take() {
                        if !c.points.is_empty() {
                            contours.push(c);
                        }
                    }
                }
            }
        }
        if let Some(c) = current {
            if !c.points.is_empty() {
                contours.push(c);
            }
        }

        let mut bbox = Rect { x_min: f64::MAX, y_min: f64::MAX, x_max: f64::MIN, y_max: f64::MIN };
        let mut any = false;
        for c in &contours {
            for &(x, y, _) in &c.points {
                any = true;
                bbox.extend(Point::new(x, y));
            }
        }
        if !any {
            bbox = Rect::default();
        }

        GlyphOutline {
            glyph_id: u32::from(glyph_id.0),
            contours,
            metrics: GlyphMetrics {
                advance_width: 0,
                lsb: 0,
                x_min: bbox.x_min as i16,
                y_min: bbox.y_min as i16,
                x_max: bbox.x_max as i16,
                y_max: bbox.y_max as i16,
            },
            is_composite: false,
            component_ids: Vec::new(),
        }
    }
}

#[cfg(feature = "std")]
fn alloc_vec1<T>(v: T) -> Vec<T> {
    let mut out = Vec::with_capacity(4);
    out.push(v);
    out
}

/// A 2x2 affine transform plus translation, used by composite glyphs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }
}

impl Transform {
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Transform { a, b, c, d, e, f }
    }

    pub fn is_default(&self) -> bool {
        *self == Transform::default()
    }

    /// Applies `self` after `self` has already been combined with a parent
    /// transform via `combine`; matches the teacher's `glyf::Transform`
    /// combination order (component transform composed with parent).
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn apply_to(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}
