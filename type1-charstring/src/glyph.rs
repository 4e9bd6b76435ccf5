//! Loading of whole glyphs.

use crate::blend::Blend;
use crate::builder::SubGlyph;
use crate::decoder::Decoder;
use crate::error::Result;
use crate::hinting::{Hinter, NoHinting};
use crate::outline::{Outline, Rect, Vector};
use crate::source::GlyphSource;
use crate::subrs::Subroutines;
use crate::{DecoderSettings, GlyphId};

/// The data of a font the decoder needs.
#[derive(Clone, Copy)]
pub struct Font<'a> {
    /// The glyphs of the font.
    pub glyphs: &'a dyn GlyphSource,
    /// The subroutines of the font.
    pub subrs: Subroutines<'a>,
    /// The design weights, for multiple master fonts.
    pub blend: Option<&'a Blend>,
}

impl<'a> Font<'a> {
    /// Creates a font without multiple master data.
    pub fn new(glyphs: &'a dyn GlyphSource, subrs: Subroutines<'a>) -> Self {
        Self {
            glyphs,
            subrs,
            blend: None,
        }
    }

    fn decoder<H: Hinter>(&self, settings: DecoderSettings, hinter: H) -> Decoder<'a, H> {
        let decoder = Decoder::new(self.glyphs, self.subrs, hinter).with_settings(settings);

        match self.blend {
            Some(blend) => decoder.with_blend(blend),
            None => decoder,
        }
    }
}

impl core::fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Font")
            .field("num_glyphs", &self.glyphs.num_glyphs())
            .field("subrs", &self.subrs)
            .field("blend", &self.blend)
            .finish()
    }
}

/// How a glyph is described.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GlyphFormat {
    /// The glyph has an outline.
    Outline,
    /// The glyph is a composite, described by its sub-glyphs.
    Composite,
}

/// The metrics of a glyph in font units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GlyphMetrics {
    /// The side bearing.
    pub left_bearing: Vector,
    /// The advance.
    pub advance: Vector,
    /// The control box of the outline, if it has any points.
    pub bbox: Option<Rect>,
}

/// A loaded glyph.
#[derive(Clone, Debug)]
pub struct Glyph {
    /// The outline. Empty for composites.
    pub outline: Outline,
    /// The metrics.
    pub metrics: GlyphMetrics,
    /// The components of a composite glyph.
    pub subglyphs: Vec<SubGlyph>,
    /// Whether the glyph is an outline or a composite.
    pub format: GlyphFormat,
}

/// Decodes a glyph.
pub fn load_glyph<H: Hinter>(
    font: &Font<'_>,
    glyph: GlyphId,
    settings: DecoderSettings,
    hinter: H,
) -> Result<Glyph> {
    let mut decoder = font.decoder(settings, hinter);
    decoder.parse_glyph(glyph)?;

    let builder = decoder.into_builder();
    let left_bearing = builder.left_bearing();
    let advance = builder.advance();
    let (outline, subglyphs) = builder.loader.into_parts();

    let format = if subglyphs.is_empty() {
        GlyphFormat::Outline
    } else {
        GlyphFormat::Composite
    };

    Ok(Glyph {
        metrics: GlyphMetrics {
            left_bearing,
            advance,
            bbox: outline.bbox(),
        },
        outline,
        subglyphs,
        format,
    })
}

/// Decodes only the metrics of a glyph.
pub fn glyph_metrics(font: &Font<'_>, glyph: GlyphId) -> Result<GlyphMetrics> {
    let settings = DecoderSettings {
        metrics_only: true,
        ..DecoderSettings::default()
    };

    load_glyph(font, glyph, settings, NoHinting).map(|g| g.metrics)
}

/// Returns the largest advance width of all glyphs in the font.
///
/// Glyphs that fail to decode are skipped.
pub fn compute_max_advance(font: &Font<'_>) -> i32 {
    let num_glyphs = font.glyphs.num_glyphs().min(usize::from(u16::MAX) + 1);

    (0..num_glyphs)
        .filter_map(|n| u16::try_from(n).ok())
        .filter_map(|n| match glyph_metrics(font, GlyphId(n)) {
            Ok(metrics) => Some(metrics.advance.x),
            Err(e) => {
                lwarn!("skipping glyph {} when computing max advance: {}", n, e);
                None
            }
        })
        .fold(0, i32::max)
}
