/*!
An interpreter for PostScript Type 1 charstrings.

A Type 1 charstring is a small stack-based program describing the outline of
a glyph. This crate executes such programs, including subroutine calls,
flex, hint replacement, multiple master blending and accented characters
built with `seac`, and returns the resulting outline along with the glyph's
metrics.

Reading the font file itself is left to the caller: the decoder only needs
the decrypted charstrings, the subroutines and the glyph names, provided
through [`GlyphSource`] and [`Subroutines`]. The [`decrypt`] module helps
with getting there.

```
use type1_charstring::{DecoderSettings, Font, GlyphId, GlyphTable, NoHinting, Subroutines, load_glyph};

// 0 500 hsbw  10 10 rmoveto  5 0 rlineto  0 5 rlineto  closepath  endchar
let table = GlyphTable::with_names([(
    "square",
    vec![139, 248, 136, 13, 149, 149, 21, 144, 139, 5, 139, 144, 5, 9, 14],
)]);
let font = Font::new(&table, Subroutines::EMPTY);

let glyph = load_glyph(&font, GlyphId(0), DecoderSettings::default(), NoHinting).unwrap();
assert_eq!(glyph.metrics.advance.x, 500);
assert_eq!(glyph.outline.points.len(), 3);
```

# Safety
This crate forbids unsafe code via a crate-level attribute.

# Cargo features
- `logging`: report decoding problems through the `log` crate.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[macro_use]
mod log;

mod argstack;
mod blend;
mod builder;
mod decoder;
pub mod decrypt;
mod error;
mod glyph;
mod hinting;
mod operator;
mod outline;
mod resolver;
mod source;
mod standard;
mod stream;
mod subrs;
mod util;

pub use blend::Blend;
pub use builder::{Builder, GlyphLoader, SubGlyph, SubGlyphFlags};
pub use decoder::{Decoder, MAX_SUBRS_CALLS};
pub use error::{DecodeError, Result, SyntaxError};
pub use glyph::{
    Font, Glyph, GlyphFormat, GlyphMetrics, compute_max_advance, glyph_metrics, load_glyph,
};
pub use hinting::{Hinter, NoHinting};
pub use outline::{Outline, OutlineBuilder, OutlinePoint, Rect, Vector};
pub use resolver::lookup_standard_code;
pub use source::{GlyphSource, GlyphTable};
pub use subrs::Subroutines;
pub use util::Fixed;

/// A type-safe wrapper for glyph ID.
#[repr(transparent)]
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Default, Debug, Hash)]
pub struct GlyphId(pub u16);

/// Settings that control how a glyph is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderSettings {
    /// Stop after `hsbw` or `sbw`, only reading the glyph's metrics.
    pub metrics_only: bool,
    /// Describe accented characters built with `seac` as two sub-glyphs
    /// instead of loading the outlines of their components.
    pub no_recurse: bool,
}
