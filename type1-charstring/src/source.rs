//! Access to the glyphs of a font.

use crate::GlyphId;

/// Provides the charstrings and glyph names of a font.
///
/// The decoder uses it to load the components of accented characters.
pub trait GlyphSource {
    /// Returns the number of glyphs in the font.
    fn num_glyphs(&self) -> usize;

    /// Returns whether the font has glyph names at all. CID fonts without an
    /// encoding don't.
    fn has_glyph_names(&self) -> bool;

    /// Returns the name of a glyph.
    fn glyph_name(&self, glyph: GlyphId) -> Option<&str>;

    /// Returns the decrypted charstring of a glyph.
    fn charstring(&self, glyph: GlyphId) -> Option<&[u8]>;
}

/// A ready-made, owned [`GlyphSource`].
#[derive(Clone, Default, Debug)]
pub struct GlyphTable {
    names: Option<Vec<String>>,
    charstrings: Vec<Vec<u8>>,
}

impl GlyphTable {
    /// Creates a table of named glyphs from `(name, charstring)` pairs.
    pub fn with_names<N, C>(glyphs: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<Vec<u8>>,
    {
        let (names, charstrings): (Vec<String>, Vec<Vec<u8>>) = glyphs
            .into_iter()
            .map(|(name, charstring)| (name.into(), charstring.into()))
            .unzip();

        Self {
            names: Some(names),
            charstrings,
        }
    }

    /// Creates a table of glyphs without names.
    pub fn unnamed<C>(charstrings: impl IntoIterator<Item = C>) -> Self
    where
        C: Into<Vec<u8>>,
    {
        Self {
            names: None,
            charstrings: charstrings.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first glyph called `name`.
    pub fn glyph_by_name(&self, name: &str) -> Option<GlyphId> {
        let names = self.names.as_ref()?;
        let index = names.iter().position(|n| n == name)?;

        u16::try_from(index).ok().map(GlyphId)
    }
}

impl GlyphSource for GlyphTable {
    fn num_glyphs(&self) -> usize {
        self.charstrings.len()
    }

    fn has_glyph_names(&self) -> bool {
        self.names.is_some()
    }

    fn glyph_name(&self, glyph: GlyphId) -> Option<&str> {
        self.names
            .as_ref()?
            .get(usize::from(glyph.0))
            .map(String::as_str)
    }

    fn charstring(&self, glyph: GlyphId) -> Option<&[u8]> {
        self.charstrings.get(usize::from(glyph.0)).map(Vec::as_slice)
    }
}
