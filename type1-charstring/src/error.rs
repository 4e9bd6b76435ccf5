//! Error types for charstring decoding.

use core::fmt;

/// The main error type for Type 1 charstring decoding.
///
/// Every error is fatal to the glyph being decoded. Callers usually fall back
/// to rendering a blank or `.notdef` glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The charstring program is malformed.
    Syntax(SyntaxError),
    /// An operator found fewer operands on the stack than it needs.
    StackUnderflow,
    /// More operands were pushed than the operand stack can hold.
    StackOverflow,
    /// Subroutine calls were nested too deeply.
    NestingLimitReached,
    /// A `callsubr` referenced a subroutine that is out of range or empty.
    InvalidSubroutineIndex,
    /// A `div` operator with a zero divisor.
    DivisionByZero,
    /// A `return` without an enclosing subroutine call.
    UnbalancedReturn,
    /// Growing the outline storage failed.
    OutOfMemory,
    /// The glyph source has no charstring for a requested glyph.
    InvalidGlyph,
}

/// Ways in which a charstring program can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that is neither an operator nor the start of a number.
    InvalidOperator(u8),
    /// An escape (`12`) followed by an unknown second byte.
    InvalidEscape(u8),
    /// The program ended in the middle of an escape or a number.
    UnexpectedEof,
    /// `setcurrentpoint` outside of the flex closing sequence.
    UnexpectedSetCurrentPoint,
    /// The flex closing sequence was not `pop pop setcurrentpoint`.
    InvalidFlex,
    /// Flex was closed without being opened, or with the wrong number of points.
    UnexpectedFlexEnd,
    /// Hint replacement was not followed by `pop`.
    ExpectedPop,
    /// `seac` was used in a font without glyph names.
    MissingGlyphNames,
    /// A `seac` character code could not be resolved to a glyph.
    InvalidSeacCode,
    /// An unknown othersubr, or an othersubr with invalid arguments.
    UnexpectedOtherSubr {
        /// The othersubr number.
        index: i32,
        /// The argument count that came with it.
        num_args: i32,
    },
    /// A multiple master othersubr in a font without blend data.
    MissingBlend,
    /// A multiple master othersubr with the wrong number of arguments.
    InvalidBlendArguments,
    /// The hinter refused to close the hint recording session.
    HintsNotClosed,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::StackUnderflow => write!(f, "operand stack underflow"),
            Self::StackOverflow => write!(f, "operand stack overflow"),
            Self::NestingLimitReached => write!(f, "too many nested subroutine calls"),
            Self::InvalidSubroutineIndex => write!(f, "invalid subroutine index"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::UnbalancedReturn => write!(f, "return without subroutine call"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::InvalidGlyph => write!(f, "invalid glyph"),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperator(b) => write!(f, "invalid byte ({b})"),
            Self::InvalidEscape(b) => write!(f, "invalid escape (12+{b})"),
            Self::UnexpectedEof => write!(f, "unexpected end of charstring"),
            Self::UnexpectedSetCurrentPoint => write!(f, "unexpected setcurrentpoint"),
            Self::InvalidFlex => write!(f, "invalid flex charstring"),
            Self::UnexpectedFlexEnd => write!(f, "unexpected flex end"),
            Self::ExpectedPop => write!(f, "expected pop after hint replacement"),
            Self::MissingGlyphNames => write!(f, "glyph names table not available"),
            Self::InvalidSeacCode => write!(f, "invalid seac character code arguments"),
            Self::UnexpectedOtherSubr { index, num_args } => {
                write!(f, "invalid othersubr [{num_args} {index}]")
            }
            Self::MissingBlend => write!(f, "unexpected multiple masters operator"),
            Self::InvalidBlendArguments => write!(f, "incorrect number of mm arguments"),
            Self::HintsNotClosed => write!(f, "failed to close hints"),
        }
    }
}

impl core::error::Error for DecodeError {}
impl core::error::Error for SyntaxError {}

impl From<SyntaxError> for DecodeError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

/// A specialized [`Result`] type for charstring decoding.
pub type Result<T> = core::result::Result<T, DecodeError>;
