//! Accumulation of glyph outlines during decoding.

use bitflags::bitflags;

use crate::error::{DecodeError, Result};
use crate::outline::{Outline, OutlinePoint, Vector};
use crate::GlyphId;

bitflags! {
    /// Flags describing how a sub-glyph is placed.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
    pub struct SubGlyphFlags: u16 {
        /// `arg1` and `arg2` are x and y offsets.
        const ARGS_ARE_XY_VALUES = 0x0002;
        /// The composite uses the metrics of this sub-glyph.
        const USE_MY_METRICS = 0x0200;
    }
}

/// One component of a composite glyph.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct SubGlyph {
    /// The glyph to place.
    pub glyph: GlyphId,
    /// Placement flags.
    pub flags: SubGlyphFlags,
    /// The horizontal offset.
    pub arg1: i32,
    /// The vertical offset.
    pub arg2: i32,
}

/// Holds the outline pieces of a glyph being loaded.
///
/// `current` receives the points of the charstring being decoded. Once it
/// finishes, [`GlyphLoader::add`] moves them to `base`, which is what a
/// composite glyph stacks its components onto.
#[derive(Clone, Default, Debug)]
pub struct GlyphLoader {
    pub(crate) base: Outline,
    pub(crate) current: Outline,
    subglyphs: Vec<SubGlyph>,
}

impl GlyphLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished part of the glyph.
    pub fn base(&self) -> &Outline {
        &self.base
    }

    /// The part of the glyph that is currently being decoded.
    pub fn current(&self) -> &Outline {
        &self.current
    }

    /// The sub-glyphs recorded for a composite glyph.
    pub fn subglyphs(&self) -> &[SubGlyph] {
        &self.subglyphs
    }

    /// Ensures there is room for `points` more points and `contours` more
    /// contours in the current outline.
    pub fn check_points(&mut self, points: usize, contours: usize) -> Result<()> {
        self.current
            .points
            .try_reserve(points)
            .map_err(|_| DecodeError::OutOfMemory)?;
        self.current
            .contours
            .try_reserve(contours)
            .map_err(|_| DecodeError::OutOfMemory)
    }

    /// Ensures there is room for `count` more sub-glyphs.
    pub fn check_subglyphs(&mut self, count: usize) -> Result<()> {
        self.subglyphs
            .try_reserve(count)
            .map_err(|_| DecodeError::OutOfMemory)
    }

    /// Discards the current outline.
    pub fn prepare(&mut self) {
        self.current.points.clear();
        self.current.contours.clear();
    }

    /// Appends the current outline to the base outline and starts a new,
    /// empty current outline.
    pub fn add(&mut self) -> Result<()> {
        let offset = self.base.points.len();

        self.base
            .points
            .try_reserve(self.current.points.len())
            .map_err(|_| DecodeError::OutOfMemory)?;
        self.base
            .contours
            .try_reserve(self.current.contours.len())
            .map_err(|_| DecodeError::OutOfMemory)?;

        self.base.points.extend_from_slice(&self.current.points);
        self.base
            .contours
            .extend(self.current.contours.iter().map(|&end| end + offset));

        self.prepare();

        Ok(())
    }

    pub(crate) fn push_subglyph(&mut self, subglyph: SubGlyph) {
        self.subglyphs.push(subglyph);
    }

    pub(crate) fn into_parts(self) -> (Outline, Vec<SubGlyph>) {
        (self.base, self.subglyphs)
    }
}

/// The outline builder driven by the decoder.
///
/// Owns the glyph loader together with the pen state and the metrics found
/// in the charstring.
#[derive(Clone, Default, Debug)]
pub struct Builder {
    pub(crate) loader: GlyphLoader,
    pub(crate) path_begun: bool,
    pub(crate) pos_x: i32,
    pub(crate) pos_y: i32,
    pub(crate) last: Vector,
    pub(crate) left_bearing: Vector,
    pub(crate) advance: Vector,
    pub(crate) metrics_only: bool,
    pub(crate) no_recurse: bool,
}

impl Builder {
    /// Creates a new builder with an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyph loader holding the outline built so far.
    pub fn loader(&self) -> &GlyphLoader {
        &self.loader
    }

    /// Whether a contour is currently open.
    pub fn path_begun(&self) -> bool {
        self.path_begun
    }

    /// The left side bearing set by `hsbw` or `sbw`.
    pub fn left_bearing(&self) -> Vector {
        self.left_bearing
    }

    /// The advance set by `hsbw` or `sbw`.
    pub fn advance(&self) -> Vector {
        self.advance
    }

    /// The last point that was added, or the origin set by `hsbw`/`sbw`.
    pub fn last(&self) -> Vector {
        self.last
    }

    /// Ensures there is room for `count` more points.
    pub fn check_points(&mut self, count: usize) -> Result<()> {
        self.loader.check_points(count, 0)
    }

    /// Appends a point without reserving room for it first.
    pub fn add_point(&mut self, x: i32, y: i32, on_curve: bool) {
        self.loader
            .current
            .points
            .push(OutlinePoint { x, y, on_curve });
        self.last = Vector::new(x, y);
    }

    /// Reserves room for and appends an on-curve point.
    pub fn add_point1(&mut self, x: i32, y: i32) -> Result<()> {
        self.check_points(1)?;
        self.add_point(x, y, true);

        Ok(())
    }

    /// Starts a new contour at the current point count.
    pub fn add_contour(&mut self) -> Result<()> {
        self.loader.check_points(0, 1)?;

        let outline = &mut self.loader.current;
        let num_points = outline.points.len();

        if let Some(end) = outline.contours.last_mut() {
            *end = num_points.saturating_sub(1);
        }

        // The real end index is written once the contour is closed.
        outline.contours.push(num_points);

        Ok(())
    }

    /// Opens a new contour at `(x, y)` unless a path is already begun.
    pub fn start_point(&mut self, x: i32, y: i32) -> Result<()> {
        if !self.path_begun {
            self.path_begun = true;
            self.add_contour()?;
            self.add_point1(x, y)?;
        }

        Ok(())
    }

    /// Closes the current contour.
    ///
    /// A last point that is on the curve and lies exactly on the contour's
    /// first point is dropped. A contour made of a single point is kept,
    /// whether or not it is the first one.
    pub fn close_contour(&mut self) {
        let outline = &mut self.loader.current;
        let num_contours = outline.contours.len();

        if num_contours == 0 {
            return;
        }

        let first = match num_contours {
            1 => 0,
            n => outline.contours[n - 2] + 1,
        };

        if let Some(last) = outline.points.len().checked_sub(1) {
            if last > first {
                let p1 = outline.points[first];
                let p2 = outline.points[last];

                if p2.on_curve && p1.x == p2.x && p1.y == p2.y {
                    outline.points.pop();
                }
            }
        }

        outline.contours[num_contours - 1] = outline.points.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(outline: &Outline) -> Vec<(i32, i32, bool)> {
        outline
            .points
            .iter()
            .map(|p| (p.x, p.y, p.on_curve))
            .collect()
    }

    #[test]
    fn start_point_is_idempotent() {
        let mut b = Builder::new();
        b.start_point(1, 2).unwrap();
        b.start_point(3, 4).unwrap();

        assert!(b.path_begun());
        assert_eq!(points(b.loader().current()), vec![(1, 2, true)]);
        assert_eq!(b.loader().current().contours, vec![0]);
    }

    #[test]
    fn close_drops_duplicate_end_point() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.add_point1(10, 0).unwrap();
        b.add_point1(0, 0).unwrap();
        b.close_contour();

        assert_eq!(points(b.loader().current()), vec![(0, 0, true), (10, 0, true)]);
        assert_eq!(b.loader().current().contours, vec![1]);
    }

    #[test]
    fn close_keeps_duplicate_control_point() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.check_points(3).unwrap();
        b.add_point(5, 5, false);
        b.add_point(10, 0, true);
        b.add_point(0, 0, false);
        b.close_contour();

        assert_eq!(b.loader().current().points.len(), 4);
        assert_eq!(b.loader().current().contours, vec![3]);
    }

    #[test]
    fn single_point_contour_survives_close() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.add_point1(5, 5).unwrap();
        b.close_contour();
        b.path_begun = false;

        b.start_point(7, 7).unwrap();
        b.close_contour();

        assert_eq!(b.loader().current().points.len(), 3);
        assert_eq!(b.loader().current().contours, vec![1, 2]);
    }

    #[test]
    fn second_contour_compares_against_its_own_start() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.add_point1(10, 0).unwrap();
        b.close_contour();
        b.path_begun = false;

        b.start_point(20, 20).unwrap();
        b.add_point1(30, 20).unwrap();
        b.add_point1(0, 0).unwrap();
        b.add_point1(20, 20).unwrap();
        b.close_contour();

        let current = b.loader().current();
        assert_eq!(current.points.len(), 5);
        assert_eq!(current.contours, vec![1, 4]);
    }

    #[test]
    fn add_contour_fixes_up_previous_end() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.add_point1(1, 1).unwrap();
        b.path_begun = false;
        b.start_point(2, 2).unwrap();

        assert_eq!(b.loader().current().contours, vec![1, 2]);
    }

    #[test]
    fn loader_add_rebases_contours() {
        let mut b = Builder::new();
        b.start_point(0, 0).unwrap();
        b.add_point1(1, 0).unwrap();
        b.close_contour();
        b.loader.add().unwrap();

        b.path_begun = false;
        b.start_point(5, 5).unwrap();
        b.add_point1(6, 5).unwrap();
        b.add_point1(6, 6).unwrap();
        b.close_contour();
        b.loader.add().unwrap();

        let base = b.loader().base();
        assert_eq!(base.points.len(), 5);
        assert_eq!(base.contours, vec![1, 4]);
        assert!(b.loader().current().is_empty());
    }
}
