//! Glyph outlines as produced by the decoder.

use kurbo::BezPath;

/// A trait for glyph outline construction.
pub trait OutlineBuilder {
    /// Appends a `MoveTo` segment.
    ///
    /// Start of a contour.
    fn move_to(&mut self, x: f32, y: f32);

    /// Appends a `LineTo` segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Appends a `CurveTo` segment.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);

    /// Appends a `ClosePath` segment.
    ///
    /// End of a contour.
    fn close(&mut self);
}

/// A two-dimensional vector in font units.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
pub struct Vector {
    /// The horizontal component.
    pub x: i32,
    /// The vertical component.
    pub y: i32,
}

impl Vector {
    /// Creates a new vector.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point of an outline.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct OutlinePoint {
    /// The horizontal position in font units.
    pub x: i32,
    /// The vertical position in font units.
    pub y: i32,
    /// Whether the point lies on the curve. Off-curve points are cubic
    /// Bézier control points and always come in pairs.
    pub on_curve: bool,
}

/// A rectangle.
///
/// Doesn't guarantee that `x_min` <= `x_max` and/or `y_min` <= `y_max`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Rect {
    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    #[inline]
    fn extend_by(&mut self, x: i32, y: i32) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }
}

/// A glyph outline made of contours of on-curve points and cubic control
/// points.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Outline {
    /// All points of the outline.
    pub points: Vec<OutlinePoint>,
    /// The index of the last point of each contour.
    pub contours: Vec<usize>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the outline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points of each contour.
    pub fn contours(&self) -> impl Iterator<Item = &[OutlinePoint]> + '_ {
        let mut first = 0;

        self.contours.iter().filter_map(move |&last| {
            let contour = self.points.get(first..=last);
            first = last + 1;
            contour
        })
    }

    /// Moves every point by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for p in &mut self.points {
            p.x = p.x.wrapping_add(dx);
            p.y = p.y.wrapping_add(dy);
        }
    }

    /// Returns the control box of the outline, i.e. the bounding box of all
    /// of its points including control points.
    pub fn bbox(&self) -> Option<Rect> {
        let (first, rest) = self.points.split_first()?;
        let mut rect = Rect {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };

        for p in rest {
            rect.extend_by(p.x, p.y);
        }

        Some(rect)
    }

    /// Emits the outline as a sequence of path commands.
    pub fn decompose(&self, builder: &mut dyn OutlineBuilder) {
        for contour in self.contours() {
            decompose_contour(contour, builder);
        }
    }

    /// Converts the outline into a Bézier path.
    pub fn to_path(&self) -> BezPath {
        let mut path = OutlinePath(BezPath::new());
        self.decompose(&mut path);
        path.0
    }
}

fn decompose_contour(points: &[OutlinePoint], builder: &mut dyn OutlineBuilder) {
    let len = points.len();

    if len == 0 {
        return;
    }

    // Type 1 contours always start on the curve, but a contour whose
    // duplicate end point was dropped may need to start at its last point.
    let start = if points[0].on_curve {
        0
    } else if points[len - 1].on_curve {
        len - 1
    } else {
        lwarn!("skipping contour without on-curve start point");

        return;
    };

    let p0 = points[start];
    builder.move_to(p0.x as f32, p0.y as f32);

    let mut controls: [Option<OutlinePoint>; 2] = [None, None];

    for k in 1..=len {
        let p = points[(start + k) % len];
        let closing = k == len;

        if !p.on_curve {
            match controls {
                [None, _] => controls[0] = Some(p),
                [Some(_), None] => controls[1] = Some(p),
                [Some(_), Some(_)] => {
                    lwarn!("dropping surplus control point in contour");
                }
            }

            continue;
        }

        match controls {
            [Some(c1), Some(c2)] => builder.curve_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            // The closing segment back to the start is implied by `close`.
            _ if closing => {}
            _ => builder.line_to(p.x as f32, p.y as f32),
        }

        controls = [None, None];
    }

    builder.close();
}

struct OutlinePath(BezPath);

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x as f64, y as f64));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.curve_to(
            (x1 as f64, y1 as f64),
            (x2 as f64, y2 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}
