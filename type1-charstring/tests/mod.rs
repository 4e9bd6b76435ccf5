use type1_charstring::{
    Builder, DecodeError, Decoder, GlyphTable, Hinter, NoHinting, Outline, OutlineBuilder,
    Subroutines,
};

mod hints;

/// A charstring token.
#[derive(Clone, Copy, Debug)]
pub(crate) enum T {
    /// A number.
    N(i32),
    /// An operator.
    O(Op),
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Op {
    HStem,
    VStem,
    VMoveTo,
    RLineTo,
    HLineTo,
    VLineTo,
    RrCurveTo,
    ClosePath,
    CallSubr,
    Return,
    Hsbw,
    EndChar,
    RMoveTo,
    HMoveTo,
    VhCurveTo,
    HvCurveTo,
    DotSection,
    VStem3,
    HStem3,
    Seac,
    Sbw,
    Div,
    CallOtherSubr,
    Pop,
    SetCurrentPoint,
}

impl Op {
    pub(crate) fn bytes(self) -> &'static [u8] {
        match self {
            Self::HStem => &[1],
            Self::VStem => &[3],
            Self::VMoveTo => &[4],
            Self::RLineTo => &[5],
            Self::HLineTo => &[6],
            Self::VLineTo => &[7],
            Self::RrCurveTo => &[8],
            Self::ClosePath => &[9],
            Self::CallSubr => &[10],
            Self::Return => &[11],
            Self::Hsbw => &[13],
            Self::EndChar => &[14],
            Self::RMoveTo => &[21],
            Self::HMoveTo => &[22],
            Self::VhCurveTo => &[30],
            Self::HvCurveTo => &[31],
            Self::DotSection => &[12, 0],
            Self::VStem3 => &[12, 1],
            Self::HStem3 => &[12, 2],
            Self::Seac => &[12, 6],
            Self::Sbw => &[12, 7],
            Self::Div => &[12, 12],
            Self::CallOtherSubr => &[12, 16],
            Self::Pop => &[12, 17],
            Self::SetCurrentPoint => &[12, 33],
        }
    }
}

/// Encodes a number the way Type 1 charstrings do, using the shortest form.
pub(crate) fn encode_number(v: i32, out: &mut Vec<u8>) {
    match v {
        -107..=107 => out.push((v + 139) as u8),
        108..=1131 => {
            let v = v - 108;
            out.push((v >> 8) as u8 + 247);
            out.push((v & 0xFF) as u8);
        }
        -1131..=-108 => {
            let v = -v - 108;
            out.push((v >> 8) as u8 + 251);
            out.push((v & 0xFF) as u8);
        }
        _ => {
            out.push(255);
            out.extend(v.to_be_bytes());
        }
    }
}

/// Assembles a charstring.
pub(crate) fn cs(tokens: &[T]) -> Vec<u8> {
    let mut out = vec![];

    for token in tokens {
        match *token {
            T::N(v) => encode_number(v, &mut out),
            T::O(op) => out.extend_from_slice(op.bytes()),
        }
    }

    out
}

/// Runs a charstring without subroutines or glyph names.
pub(crate) fn run(charstring: &[u8]) -> (Result<(), DecodeError>, Builder) {
    run_with_subrs(charstring, Subroutines::EMPTY)
}

pub(crate) fn run_with_subrs(
    charstring: &[u8],
    subrs: Subroutines<'_>,
) -> (Result<(), DecodeError>, Builder) {
    let glyphs = GlyphTable::default();
    let mut decoder = Decoder::new(&glyphs, subrs, NoHinting);
    let result = decoder.parse_charstrings(charstring);

    (result, decoder.into_builder())
}

/// Returns the points of an outline as `(x, y, on_curve)` triples.
pub(crate) fn points(outline: &Outline) -> Vec<(i32, i32, bool)> {
    outline
        .points
        .iter()
        .map(|p| (p.x, p.y, p.on_curve))
        .collect()
}

/// Records path commands as strings.
#[derive(Default)]
pub(crate) struct PathRecorder(pub(crate) Vec<String>);

impl OutlineBuilder for PathRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.push(format!("M {x} {y}"));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.push(format!("L {x} {y}"));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.push(format!("C {x1} {y1} {x2} {y2} {x} {y}"));
    }

    fn close(&mut self) {
        self.0.push("Z".to_string());
    }
}

pub(crate) fn commands(outline: &Outline) -> Vec<String> {
    let mut recorder = PathRecorder::default();
    outline.decompose(&mut recorder);
    recorder.0
}

/// Records every hinter call.
#[derive(Default, Debug)]
pub(crate) struct HintRecorder {
    pub(crate) calls: Vec<String>,
    pub(crate) refuse_close: bool,
}

impl Hinter for HintRecorder {
    fn open_hints(&mut self) {
        self.calls.push("open".to_string());
    }

    fn record_stem(&mut self, horizontal: bool, stem: [i32; 2]) {
        let dir = if horizontal { "h" } else { "v" };
        self.calls.push(format!("{dir}stem {} {}", stem[0], stem[1]));
    }

    fn record_stem3(&mut self, horizontal: bool, stems: [i32; 6]) {
        let dir = if horizontal { "h" } else { "v" };
        self.calls.push(format!("{dir}stem3 {stems:?}"));
    }

    fn reset_hints(&mut self, num_points: usize) {
        self.calls.push(format!("reset {num_points}"));
    }

    fn close_hints(&mut self, num_points: usize) -> Option<()> {
        self.calls.push(format!("close {num_points}"));

        if self.refuse_close { None } else { Some(()) }
    }

    fn apply_hints(&mut self, outline: &mut Outline) {
        self.calls.push(format!("apply {}", outline.points.len()));
    }
}
