//! The Type 1 charstring interpreter.

use smallvec::SmallVec;

use crate::argstack::ArgumentsStack;
use crate::blend::Blend;
use crate::builder::{Builder, SubGlyph, SubGlyphFlags};
use crate::error::{DecodeError, Result, SyntaxError};
use crate::hinting::{Hinter, NoHinting};
use crate::operator::{FLEX_END_SEQUENCE, Operator, POP_SEQUENCE};
use crate::outline::Vector;
use crate::resolver::lookup_standard_code;
use crate::source::GlyphSource;
use crate::stream::Stream;
use crate::subrs::Subroutines;
use crate::{DecoderSettings, GlyphId};

/// The maximum number of nested subroutine calls.
pub const MAX_SUBRS_CALLS: usize = 10;

/// The maximum number of nested glyph loads caused by `seac`.
const MAX_GLYPH_DEPTH: usize = MAX_SUBRS_CALLS;

/// The number of points a flex sequence is made of.
const NUM_FLEX_VECTORS: u32 = 7;

/// Executes Type 1 charstrings and accumulates their outlines.
///
/// A decoder is meant to be used for a single glyph: create it, call
/// [`Decoder::parse_glyph`] or [`Decoder::parse_charstrings`] and take the
/// result out of its [`Builder`].
pub struct Decoder<'a, H: Hinter = NoHinting> {
    builder: Builder,
    stack: ArgumentsStack,
    flex_state: bool,
    num_flex_vectors: u32,
    glyph_depth: usize,
    glyphs: &'a dyn GlyphSource,
    subrs: Subroutines<'a>,
    blend: Option<&'a Blend>,
    hinter: H,
}

impl<'a, H: Hinter> Decoder<'a, H> {
    /// Creates a new decoder for glyphs of the given font.
    pub fn new(glyphs: &'a dyn GlyphSource, subrs: Subroutines<'a>, hinter: H) -> Self {
        Self {
            builder: Builder::new(),
            stack: ArgumentsStack::new(),
            flex_state: false,
            num_flex_vectors: 0,
            glyph_depth: 0,
            glyphs,
            subrs,
            blend: None,
            hinter,
        }
    }

    /// Applies the given settings.
    pub fn with_settings(mut self, settings: DecoderSettings) -> Self {
        self.builder.metrics_only = settings.metrics_only;
        self.builder.no_recurse = settings.no_recurse;
        self
    }

    /// Sets the weights used by the multiple master othersubrs.
    pub fn with_blend(mut self, blend: &'a Blend) -> Self {
        self.blend = Some(blend);
        self
    }

    /// Returns the builder holding the decoded outline and metrics.
    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Consumes the decoder, returning its builder.
    pub fn into_builder(self) -> Builder {
        self.builder
    }

    /// Returns the hinter.
    pub fn hinter(&self) -> &H {
        &self.hinter
    }

    /// Loads the charstring of `glyph` from the glyph source and executes it.
    pub fn parse_glyph(&mut self, glyph: GlyphId) -> Result<()> {
        let charstring = self.glyphs.charstring(glyph).ok_or_else(|| {
            lerror!("glyph {} not found", glyph.0);
            DecodeError::InvalidGlyph
        })?;

        if self.glyph_depth >= MAX_GLYPH_DEPTH {
            lerror!("too many nested glyphs");
            return Err(DecodeError::NestingLimitReached);
        }

        self.glyph_depth += 1;
        let result = self.parse_charstrings(charstring);
        self.glyph_depth -= 1;

        result
    }

    /// Executes a decrypted charstring.
    ///
    /// Returns after `endchar` or `seac`, after `hsbw`/`sbw` in metrics-only
    /// mode, or once the charstring runs out of bytes.
    pub fn parse_charstrings(&mut self, charstring: &[u8]) -> Result<()> {
        self.stack.clear();
        self.builder.path_begun = false;

        let mut zones: SmallVec<[Stream<'_>; MAX_SUBRS_CALLS + 1]> = SmallVec::new();
        let mut s = Stream::new(charstring);

        let mut x = self.builder.pos_x;
        let mut y = self.builder.pos_y;
        let mut orig_x = x;

        self.hinter.open_hints();

        while let Some(b0) = s.read_byte() {
            let op = match b0 {
                32..=255 => {
                    let value = read_number(b0, &mut s)?;
                    ltrace!("{}", value);

                    if let Err(e) = self.stack.push(value) {
                        lerror!("stack overflow");
                        return Err(e);
                    }

                    continue;
                }
                _ => Operator::read(b0, &mut s)?,
            };

            ltrace!("{:?} {:?}", op, self.stack);

            let num_args = op.num_args();

            if op == Operator::Div && self.stack.top(2)?[1] == 0 {
                lerror!("division by 0");
                return Err(DecodeError::DivisionByZero);
            }

            let mut args = [0; 6];
            args[..num_args].copy_from_slice(self.stack.pop_slice(num_args)?);

            match op {
                Operator::EndChar => {
                    self.builder.close_contour();

                    let current = &mut self.builder.loader.current;

                    if self.hinter.close_hints(current.points.len()).is_none() {
                        lerror!("failed to close hints");
                        return Err(SyntaxError::HintsNotClosed.into());
                    }

                    self.hinter.apply_hints(current);
                    self.builder.loader.add()?;

                    return Ok(());
                }
                Operator::Hsbw => {
                    let lsb = &mut self.builder.left_bearing;
                    lsb.x = lsb.x.wrapping_add(args[0]);
                    self.builder.advance = Vector::new(args[1], 0);

                    x = self.builder.pos_x.wrapping_add(args[0]);
                    y = self.builder.pos_y;
                    orig_x = x;
                    self.builder.last = Vector::new(x, y);

                    if self.builder.metrics_only {
                        return Ok(());
                    }
                }
                Operator::Seac => {
                    return self.seac(args[0], args[1], args[2], args[3], args[4]);
                }
                Operator::Sbw => {
                    let lsb = &mut self.builder.left_bearing;
                    lsb.x = lsb.x.wrapping_add(args[0]);
                    lsb.y = lsb.y.wrapping_add(args[1]);
                    self.builder.advance = Vector::new(args[2], args[3]);

                    x = self.builder.pos_x.wrapping_add(args[0]);
                    y = self.builder.pos_y.wrapping_add(args[1]);
                    // Vertical stems stay relative to the pen origin.
                    self.builder.last = Vector::new(x, y);

                    if self.builder.metrics_only {
                        return Ok(());
                    }
                }
                Operator::ClosePath => {
                    self.builder.close_contour();
                    self.builder.path_begun = false;
                }
                Operator::HLineTo => {
                    self.builder.start_point(x, y)?;
                    x = x.wrapping_add(args[0]);
                    self.builder.add_point1(x, y)?;
                }
                Operator::VLineTo => {
                    self.builder.start_point(x, y)?;
                    y = y.wrapping_add(args[0]);
                    self.builder.add_point1(x, y)?;
                }
                Operator::RLineTo => {
                    self.builder.start_point(x, y)?;
                    x = x.wrapping_add(args[0]);
                    y = y.wrapping_add(args[1]);
                    self.builder.add_point1(x, y)?;
                }
                Operator::HMoveTo => {
                    x = x.wrapping_add(args[0]);
                    self.end_path();
                }
                Operator::VMoveTo => {
                    y = y.wrapping_add(args[0]);
                    self.end_path();
                }
                Operator::RMoveTo => {
                    x = x.wrapping_add(args[0]);
                    y = y.wrapping_add(args[1]);
                    self.end_path();
                }
                Operator::RrCurveTo => {
                    self.builder.start_point(x, y)?;
                    self.builder.check_points(3)?;

                    for (i, d) in args.chunks_exact(2).enumerate() {
                        x = x.wrapping_add(d[0]);
                        y = y.wrapping_add(d[1]);
                        self.builder.add_point(x, y, i == 2);
                    }
                }
                Operator::HvCurveTo => {
                    self.builder.start_point(x, y)?;
                    self.builder.check_points(3)?;

                    x = x.wrapping_add(args[0]);
                    self.builder.add_point(x, y, false);
                    x = x.wrapping_add(args[1]);
                    y = y.wrapping_add(args[2]);
                    self.builder.add_point(x, y, false);
                    y = y.wrapping_add(args[3]);
                    self.builder.add_point(x, y, true);
                }
                Operator::VhCurveTo => {
                    self.builder.start_point(x, y)?;
                    self.builder.check_points(3)?;

                    y = y.wrapping_add(args[0]);
                    self.builder.add_point(x, y, false);
                    x = x.wrapping_add(args[1]);
                    y = y.wrapping_add(args[2]);
                    self.builder.add_point(x, y, false);
                    x = x.wrapping_add(args[3]);
                    self.builder.add_point(x, y, true);
                }
                Operator::Div => {
                    // Integer division truncating toward zero.
                    self.stack.push(args[0].wrapping_div(args[1]))?;
                }
                Operator::CallSubr => {
                    let subr = self.subrs.get(args[0]).inspect_err(|_| {
                        lerror!("invalid subrs index {}", args[0]);
                    })?;

                    if zones.len() >= MAX_SUBRS_CALLS {
                        lerror!("too many nested subrs");
                        return Err(DecodeError::NestingLimitReached);
                    }

                    zones.push(s);
                    s = Stream::new(subr);
                }
                Operator::Return => {
                    s = zones.pop().ok_or_else(|| {
                        lerror!("unexpected return");
                        DecodeError::UnbalancedReturn
                    })?;
                }
                Operator::Pop => {
                    // The othersubr results are still in the stack's storage.
                    self.stack.unpop()?;
                }
                Operator::DotSection => {}
                Operator::HStem => {
                    self.hinter.record_stem(true, [args[0], args[1]]);
                }
                Operator::VStem => {
                    self.hinter
                        .record_stem(false, [args[0].wrapping_add(orig_x), args[1]]);
                }
                Operator::HStem3 => {
                    self.hinter.record_stem3(true, args);
                }
                Operator::VStem3 => {
                    for i in [0, 2, 4] {
                        args[i] = args[i].wrapping_add(orig_x);
                    }

                    self.hinter.record_stem3(false, args);
                }
                Operator::SetCurrentPoint => {
                    lerror!("unexpected `setcurrentpoint`");
                    return Err(SyntaxError::UnexpectedSetCurrentPoint.into());
                }
                Operator::CallOtherSubr => self.call_other_subr(&mut s, x, y)?,
            }
        }

        ltrace!("..end..");

        Ok(())
    }

    /// A move ends the current path, except inside a flex sequence, whose
    /// moves only position the flex points.
    fn end_path(&mut self) {
        if !self.flex_state {
            self.builder.path_begun = false;
        }
    }

    fn call_other_subr(&mut self, s: &mut Stream<'_>, x: i32, y: i32) -> Result<()> {
        let [num_args, index] = self.stack.pop_array::<2>()?;

        let unexpected = || {
            lerror!("invalid othersubr [{} {}]", num_args, index);
            DecodeError::from(SyntaxError::UnexpectedOtherSubr { index, num_args })
        };

        match index {
            // Start flex.
            1 => {
                if num_args != 0 {
                    return Err(unexpected());
                }

                ldebug!("flex start at ({}, {})", x, y);

                self.flex_state = true;
                self.num_flex_vectors = 0;
                self.builder.start_point(x, y)?;
                self.builder.check_points(6)?;
            }
            // Add a flex vector. The first one only moves to the reference
            // point and does not produce an outline point.
            2 => {
                if num_args != 0 {
                    return Err(unexpected());
                }

                let idx = self.num_flex_vectors;
                self.num_flex_vectors = self.num_flex_vectors.saturating_add(1);

                if (1..NUM_FLEX_VECTORS).contains(&idx) {
                    self.builder.add_point(x, y, idx == 3 || idx == 6);
                }
            }
            // End flex.
            0 => {
                if num_args != 3 {
                    return Err(unexpected());
                }

                if !self.flex_state || self.num_flex_vectors != NUM_FLEX_VECTORS {
                    lerror!("unexpected flex end");
                    return Err(SyntaxError::UnexpectedFlexEnd.into());
                }

                // Skip the `pop pop setcurrentpoint` that always follows.
                if s.forward_tag(&FLEX_END_SEQUENCE).is_none() {
                    lerror!("invalid flex charstring");
                    return Err(SyntaxError::InvalidFlex.into());
                }

                ldebug!("flex end");

                self.flex_state = false;
            }
            // Hint replacement.
            3 => {
                if num_args != 1 {
                    return Err(unexpected());
                }

                let tail = s.tail();

                if tail.len() < POP_SEQUENCE.len() {
                    lerror!("unexpected end of charstring after hint replacement");
                    return Err(SyntaxError::UnexpectedEof.into());
                }

                if s.forward_tag(&POP_SEQUENCE).is_none() {
                    lerror!("`pop' expected, found ({} {})", tail[0], tail[1]);
                    return Err(SyntaxError::ExpectedPop.into());
                }

                let num_points = self.builder.loader.current.points.len();
                self.hinter.reset_hints(num_points);
            }
            // Counter control hints.
            12 | 13 => self.stack.clear(),
            // Multiple masters.
            14..=18 => {
                let Some(blend) = self.blend else {
                    lerror!("unexpected multiple masters operator");
                    return Err(SyntaxError::MissingBlend.into());
                };

                let num_points = match index {
                    18 => 6,
                    _ => (index - 13) as usize,
                };
                let num_values = num_points * blend.num_designs();

                if usize::try_from(num_args).ok() != Some(num_values) {
                    lerror!("incorrect number of mm arguments");
                    return Err(SyntaxError::InvalidBlendArguments.into());
                }

                // The blended values stay in the stack's storage, from where
                // the following `pop`s bring them back.
                blend.apply(self.stack.pop_slice(num_values)?, num_points)?;
            }
            _ => return Err(unexpected()),
        }

        Ok(())
    }

    fn seac(&mut self, asb: i32, adx: i32, ady: i32, bchar: i32, achar: i32) -> Result<()> {
        // The accent offset is relative to the composite's side bearing.
        let adx = adx.wrapping_add(self.builder.left_bearing.x);

        if !self.glyphs.has_glyph_names() {
            lerror!("glyph names table not available in this font");
            return Err(SyntaxError::MissingGlyphNames.into());
        }

        let base = lookup_standard_code(self.glyphs, bchar);
        let accent = lookup_standard_code(self.glyphs, achar);

        let (Some(base), Some(accent)) = (base, accent) else {
            lerror!("invalid seac character code arguments {} {}", bchar, achar);
            return Err(SyntaxError::InvalidSeacCode.into());
        };

        ldebug!(
            "seac base {} accent {} at ({}, {})",
            base.0,
            accent.0,
            adx.wrapping_sub(asb),
            ady
        );

        if self.builder.no_recurse {
            self.builder.loader.check_subglyphs(2)?;
            self.builder.loader.push_subglyph(SubGlyph {
                glyph: base,
                flags: SubGlyphFlags::ARGS_ARE_XY_VALUES | SubGlyphFlags::USE_MY_METRICS,
                arg1: 0,
                arg2: 0,
            });
            self.builder.loader.push_subglyph(SubGlyph {
                glyph: accent,
                flags: SubGlyphFlags::ARGS_ARE_XY_VALUES,
                arg1: adx.wrapping_sub(asb),
                arg2: ady,
            });

            return Ok(());
        }

        self.builder.loader.prepare();
        self.parse_glyph(base)?;

        let left_bearing = self.builder.left_bearing;
        let advance = self.builder.advance;

        self.builder.left_bearing = Vector::default();
        self.builder.pos_x = adx.wrapping_sub(asb);
        self.builder.pos_y = ady;

        self.parse_glyph(accent)?;

        // Only the outline of the accent is kept.
        self.builder.left_bearing = left_bearing;
        self.builder.advance = advance;
        self.builder.pos_x = 0;
        self.builder.pos_y = 0;

        Ok(())
    }
}

impl<H: Hinter> core::fmt::Debug for Decoder<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decoder")
            .field("builder", &self.builder)
            .field("stack", &self.stack)
            .field("flex_state", &self.flex_state)
            .field("num_flex_vectors", &self.num_flex_vectors)
            .field("subrs", &self.subrs.len())
            .finish_non_exhaustive()
    }
}

/// Decodes a number starting with `b0`, which must be at least 32.
fn read_number(b0: u8, s: &mut Stream<'_>) -> Result<i32> {
    let value = match b0 {
        32..=246 => i32::from(b0) - 139,
        247..=250 => (i32::from(b0) - 247) * 256 + i32::from(read_byte(s)?) + 108,
        251..=254 => -((i32::from(b0) - 251) * 256 + i32::from(read_byte(s)?) + 108),
        _ => s.read_i32().ok_or_else(|| {
            lerror!("unexpected EOF in integer");
            SyntaxError::UnexpectedEof
        })?,
    };

    Ok(value)
}

fn read_byte(s: &mut Stream<'_>) -> Result<u8> {
    let b = s.read_byte().ok_or_else(|| {
        lerror!("unexpected EOF in integer");
        SyntaxError::UnexpectedEof
    })?;

    Ok(b)
}
