use crate::Op::*;
use crate::T::{N, O};
use crate::{HintRecorder, cs};
use type1_charstring::{DecodeError, Decoder, GlyphTable, Hinter, Subroutines, SyntaxError};

fn record(
    charstring: &[u8],
    subrs: Subroutines<'_>,
    hinter: HintRecorder,
) -> (Result<(), DecodeError>, Vec<String>) {
    let glyphs = GlyphTable::default();
    let mut decoder = Decoder::new(&glyphs, subrs, hinter);
    let result = decoder.parse_charstrings(charstring);

    (result, decoder.hinter().calls.clone())
}

#[test]
fn stems_and_replacement() {
    let hint_subr = cs(&[N(10), N(20), O(HStem), O(Return)]);
    let subrs = [Some(hint_subr.as_slice())];

    let charstring = cs(&[
        N(5),
        N(100),
        O(Hsbw),
        N(0),
        N(20),
        O(VStem),
        N(0),
        N(0),
        O(RMoveTo),
        N(10),
        N(0),
        O(RLineTo),
        N(0),
        N(1),
        N(3),
        O(CallOtherSubr),
        O(Pop),
        O(CallSubr),
        N(0),
        N(10),
        O(RLineTo),
        O(ClosePath),
        O(EndChar),
    ]);

    let (result, calls) = record(
        &charstring,
        Subroutines::Separate(&subrs),
        HintRecorder::default(),
    );

    assert_eq!(result, Ok(()));
    assert_eq!(
        calls,
        vec![
            "open",
            "vstem 5 20",
            "reset 2",
            "hstem 10 20",
            "close 3",
            "apply 3",
        ]
    );
}

#[test]
fn stem3() {
    let charstring = cs(&[
        N(5),
        N(100),
        O(Hsbw),
        N(0),
        N(10),
        N(20),
        N(10),
        N(40),
        N(10),
        O(VStem3),
        N(0),
        N(10),
        N(20),
        N(10),
        N(40),
        N(10),
        O(HStem3),
        O(EndChar),
    ]);

    let (result, calls) = record(&charstring, Subroutines::EMPTY, HintRecorder::default());

    assert_eq!(result, Ok(()));
    assert_eq!(
        calls,
        vec![
            "open",
            "vstem3 [5, 10, 25, 10, 45, 10]",
            "hstem3 [0, 10, 20, 10, 40, 10]",
            "close 0",
            "apply 0",
        ]
    );
}

#[test]
fn vstem_ignores_side_bearing_of_sbw() {
    let charstring = cs(&[N(7), N(0), N(100), N(0), O(Sbw), N(3), N(20), O(VStem)]);

    let (result, calls) = record(&charstring, Subroutines::EMPTY, HintRecorder::default());

    assert_eq!(result, Ok(()));
    assert_eq!(calls, vec!["open", "vstem 3 20"]);

    // `hsbw` does move the stem origin.
    let charstring = cs(&[N(7), N(100), O(Hsbw), N(3), N(20), O(VStem)]);

    let (result, calls) = record(&charstring, Subroutines::EMPTY, HintRecorder::default());

    assert_eq!(result, Ok(()));
    assert_eq!(calls, vec!["open", "vstem 10 20"]);
}

#[test]
fn hint_replacement_needs_pop() {
    let (result, _) = record(
        &cs(&[
            N(0),
            N(1),
            N(3),
            O(CallOtherSubr),
            N(0),
            N(0),
            O(Hsbw),
            O(EndChar),
        ]),
        Subroutines::EMPTY,
        HintRecorder::default(),
    );

    assert_eq!(result, Err(DecodeError::Syntax(SyntaxError::ExpectedPop)));
}

#[test]
fn hint_replacement_at_end_of_charstring() {
    let (result, _) = record(
        &cs(&[N(0), N(1), N(3), O(CallOtherSubr)]),
        Subroutines::EMPTY,
        HintRecorder::default(),
    );

    assert_eq!(result, Err(DecodeError::Syntax(SyntaxError::UnexpectedEof)));
}

#[test]
fn hint_replacement_with_wrong_argument_count() {
    let (result, _) = record(
        &cs(&[N(0), N(0), N(3), O(CallOtherSubr), O(Pop)]),
        Subroutines::EMPTY,
        HintRecorder::default(),
    );

    assert_eq!(
        result,
        Err(DecodeError::Syntax(SyntaxError::UnexpectedOtherSubr {
            index: 3,
            num_args: 0,
        }))
    );
}

#[test]
fn refused_close() {
    let hinter = HintRecorder {
        refuse_close: true,
        ..HintRecorder::default()
    };

    let charstring = cs(&[N(0), N(0), O(Hsbw), O(EndChar)]);
    let (result, calls) = record(&charstring, Subroutines::EMPTY, hinter);

    assert_eq!(result, Err(DecodeError::Syntax(SyntaxError::HintsNotClosed)));
    assert_eq!(calls, vec!["open", "close 0"]);
}

#[test]
fn borrowed_hinter() {
    let glyphs = GlyphTable::default();
    let mut hinter = HintRecorder::default();

    {
        let mut decoder = Decoder::new(&glyphs, Subroutines::EMPTY, &mut hinter);
        let result = decoder.parse_charstrings(&cs(&[N(0), N(20), O(HStem), O(EndChar)]));
        assert_eq!(result, Ok(()));
    }

    hinter.reset_hints(0);
    assert_eq!(
        hinter.calls,
        vec!["open", "hstem 0 20", "close 0", "apply 0", "reset 0"]
    );
}
