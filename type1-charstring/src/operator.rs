use crate::error::{Result, SyntaxError};
use crate::stream::Stream;

pub(crate) mod sb_operator {
    pub(crate) const HORIZONTAL_STEM: u8 = 1;
    pub(crate) const VERTICAL_STEM: u8 = 3;
    pub(crate) const VERTICAL_MOVE_TO: u8 = 4;
    pub(crate) const LINE_TO: u8 = 5;
    pub(crate) const HORIZONTAL_LINE_TO: u8 = 6;
    pub(crate) const VERTICAL_LINE_TO: u8 = 7;
    pub(crate) const CURVE_TO: u8 = 8;
    pub(crate) const CLOSE_PATH: u8 = 9;
    pub(crate) const CALL_SUBR: u8 = 10;
    pub(crate) const RETURN: u8 = 11;
    pub(crate) const ESCAPE: u8 = 12;
    pub(crate) const HSBW: u8 = 13;
    pub(crate) const ENDCHAR: u8 = 14;
    pub(crate) const MOVE_TO: u8 = 21;
    pub(crate) const HORIZONTAL_MOVE_TO: u8 = 22;
    pub(crate) const VH_CURVE_TO: u8 = 30;
    pub(crate) const HV_CURVE_TO: u8 = 31;
}

pub(crate) mod tb_operator {
    pub(crate) const DOTSECTION: u8 = 0;
    pub(crate) const VSTEM3: u8 = 1;
    pub(crate) const HSTEM3: u8 = 2;
    pub(crate) const SEAC: u8 = 6;
    pub(crate) const SBW: u8 = 7;
    pub(crate) const DIV: u8 = 12;
    pub(crate) const CALL_OTHER_SUBR: u8 = 16;
    pub(crate) const POP: u8 = 17;
    pub(crate) const SET_CURRENT_POINT: u8 = 33;
}

/// The two-byte encoding of `pop`.
pub(crate) const POP_SEQUENCE: [u8; 2] = [sb_operator::ESCAPE, tb_operator::POP];

/// The bytes that must follow the othersubr call closing a flex sequence.
pub(crate) const FLEX_END_SEQUENCE: [u8; 6] = [
    sb_operator::ESCAPE,
    tb_operator::POP,
    sb_operator::ESCAPE,
    tb_operator::POP,
    sb_operator::ESCAPE,
    tb_operator::SET_CURRENT_POINT,
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Operator {
    EndChar,
    Hsbw,
    Seac,
    Sbw,
    ClosePath,
    HLineTo,
    HMoveTo,
    HvCurveTo,
    RLineTo,
    RMoveTo,
    RrCurveTo,
    VhCurveTo,
    VLineTo,
    VMoveTo,
    DotSection,
    HStem,
    HStem3,
    VStem,
    VStem3,
    Div,
    CallOtherSubr,
    CallSubr,
    Pop,
    Return,
    SetCurrentPoint,
}

impl Operator {
    /// Decodes the operator starting with `b0`, reading the second byte of
    /// escaped operators from `s`.
    pub(crate) fn read(b0: u8, s: &mut Stream<'_>) -> Result<Self> {
        use sb_operator::*;

        let op = match b0 {
            HORIZONTAL_STEM => Self::HStem,
            VERTICAL_STEM => Self::VStem,
            VERTICAL_MOVE_TO => Self::VMoveTo,
            LINE_TO => Self::RLineTo,
            HORIZONTAL_LINE_TO => Self::HLineTo,
            VERTICAL_LINE_TO => Self::VLineTo,
            CURVE_TO => Self::RrCurveTo,
            CLOSE_PATH => Self::ClosePath,
            CALL_SUBR => Self::CallSubr,
            RETURN => Self::Return,
            HSBW => Self::Hsbw,
            ENDCHAR => Self::EndChar,
            MOVE_TO => Self::RMoveTo,
            HORIZONTAL_MOVE_TO => Self::HMoveTo,
            VH_CURVE_TO => Self::VhCurveTo,
            HV_CURVE_TO => Self::HvCurveTo,
            ESCAPE => {
                let b1 = s.read_byte().ok_or_else(|| {
                    lerror!("invalid escape (12+EOF)");
                    SyntaxError::UnexpectedEof
                })?;

                match b1 {
                    tb_operator::DOTSECTION => Self::DotSection,
                    tb_operator::VSTEM3 => Self::VStem3,
                    tb_operator::HSTEM3 => Self::HStem3,
                    tb_operator::SEAC => Self::Seac,
                    tb_operator::SBW => Self::Sbw,
                    tb_operator::DIV => Self::Div,
                    tb_operator::CALL_OTHER_SUBR => Self::CallOtherSubr,
                    tb_operator::POP => Self::Pop,
                    tb_operator::SET_CURRENT_POINT => Self::SetCurrentPoint,
                    _ => {
                        lerror!("invalid escape (12+{})", b1);
                        return Err(SyntaxError::InvalidEscape(b1).into());
                    }
                }
            }
            _ => {
                lerror!("invalid byte ({})", b0);
                return Err(SyntaxError::InvalidOperator(b0).into());
            }
        };

        Ok(op)
    }

    /// The number of operands the operator needs on the stack.
    ///
    /// `callothersubr` takes a variable number of operands and pops them
    /// itself.
    pub(crate) const fn num_args(self) -> usize {
        match self {
            Self::EndChar => 0,
            Self::Hsbw => 2,
            Self::Seac => 5,
            Self::Sbw => 4,
            Self::ClosePath => 0,
            Self::HLineTo => 1,
            Self::HMoveTo => 1,
            Self::HvCurveTo => 4,
            Self::RLineTo => 2,
            Self::RMoveTo => 2,
            Self::RrCurveTo => 6,
            Self::VhCurveTo => 4,
            Self::VLineTo => 1,
            Self::VMoveTo => 1,
            Self::DotSection => 0,
            Self::HStem => 2,
            Self::HStem3 => 6,
            Self::VStem => 2,
            Self::VStem3 => 6,
            Self::Div => 2,
            Self::CallOtherSubr => 0,
            Self::CallSubr => 1,
            Self::Pop => 0,
            Self::Return => 0,
            Self::SetCurrentPoint => 2,
        }
    }
}
