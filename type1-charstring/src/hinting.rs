//! Hooks for a hinting engine.

use crate::outline::Outline;

/// Receives the hints found in a charstring.
///
/// All methods do nothing by default, so an implementation only needs to
/// override the ones it cares about.
pub trait Hinter {
    /// Starts a hint recording session. Called once at the beginning of each
    /// charstring.
    fn open_hints(&mut self) {}

    /// Records a stem given as `[position, width]`.
    ///
    /// Vertical stem positions already include the glyph's side bearing.
    fn record_stem(&mut self, _horizontal: bool, _stem: [i32; 2]) {}

    /// Records three counter-controlled stems given as position/width pairs.
    fn record_stem3(&mut self, _horizontal: bool, _stems: [i32; 6]) {}

    /// Hint replacement: the hints recorded so far apply to the first
    /// `num_points` points of the outline being decoded, new ones follow.
    fn reset_hints(&mut self, _num_points: usize) {}

    /// Ends the recording session. Returning `None` makes decoding fail.
    fn close_hints(&mut self, _num_points: usize) -> Option<()> {
        Some(())
    }

    /// Applies the recorded hints to the finished outline.
    fn apply_hints(&mut self, _outline: &mut Outline) {}
}

/// A hinter that ignores all hints.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoHinting;

impl Hinter for NoHinting {}

impl<H: Hinter + ?Sized> Hinter for &mut H {
    fn open_hints(&mut self) {
        (**self).open_hints();
    }

    fn record_stem(&mut self, horizontal: bool, stem: [i32; 2]) {
        (**self).record_stem(horizontal, stem);
    }

    fn record_stem3(&mut self, horizontal: bool, stems: [i32; 6]) {
        (**self).record_stem3(horizontal, stems);
    }

    fn reset_hints(&mut self, num_points: usize) {
        (**self).reset_hints(num_points);
    }

    fn close_hints(&mut self, num_points: usize) -> Option<()> {
        (**self).close_hints(num_points)
    }

    fn apply_hints(&mut self, outline: &mut Outline) {
        (**self).apply_hints(outline);
    }
}
