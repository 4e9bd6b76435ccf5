//! Resolution of StandardEncoding character codes to glyphs.

use crate::source::GlyphSource;
use crate::{GlyphId, standard};

/// Looks up the glyph StandardEncoding assigns to `code`.
///
/// The code is mapped to its glyph name, which is then searched for in the
/// font's glyph names. Codes without a name in StandardEncoding map to
/// `.notdef`. Returns `None` for codes outside `0..=255`, for names the font
/// does not have and for fonts without glyph names.
pub fn lookup_standard_code(source: &dyn GlyphSource, code: i32) -> Option<GlyphId> {
    let code = u8::try_from(code).ok()?;
    let name = standard::get(code).unwrap_or(".notdef");

    if !source.has_glyph_names() {
        return None;
    }

    let num_glyphs = source.num_glyphs().min(usize::from(u16::MAX) + 1);

    (0..num_glyphs)
        .filter_map(|n| u16::try_from(n).ok())
        .map(GlyphId)
        .find(|&glyph| source.glyph_name(glyph) == Some(name))
}
