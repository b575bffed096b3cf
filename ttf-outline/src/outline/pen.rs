//! Types for collecting the output when drawing a glyph outline.

use std::fmt::{self, Write};

/// Interface for accepting a sequence of path commands.
pub trait OutlinePen {
    /// Emit a command to begin a new subpath at (x, y).
    fn move_to(&mut self, x: f32, y: f32);

    /// Emit a line segment from the current point to (x, y).
    fn line_to(&mut self, x: f32, y: f32);

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at (cx0, cy0) and ending at (x, y).
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32);

    /// Emit a command to close the current subpath.
    fn close(&mut self);
}

/// Single element of a path.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub enum PathElement {
    /// Begin a new subpath at (x, y).
    MoveTo { x: f32, y: f32 },
    /// Draw a line from the current point to (x, y).
    LineTo { x: f32, y: f32 },
    /// Draw a quadratic bezier from the current point with a control point at
    /// (cx0, cy0) and ending at (x, y).
    QuadTo { cx0: f32, cy0: f32, x: f32, y: f32 },
    /// Close the current subpath.
    Close,
}

impl OutlinePen for Vec<PathElement> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathElement::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathElement::LineTo { x, y })
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.push(PathElement::QuadTo { cx0, cy0, x, y })
    }

    fn close(&mut self) {
        self.push(PathElement::Close)
    }
}

/// Pen that generates SVG style path data.
#[derive(Clone, Default, Debug)]
pub struct SvgPen(String, Option<usize>);

impl SvgPen {
    /// Creates a new SVG pen that formats floating point values with the
    /// standard behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new SVG pen with the given precision (the number of digits
    /// that will be printed after the decimal).
    pub fn with_precision(precision: usize) -> Self {
        Self(String::default(), Some(precision))
    }

    /// Clears the content of the internal string.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn maybe_push_space(&mut self) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
    }
}

impl std::ops::Deref for SvgPen {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl OutlinePen for SvgPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.maybe_push_space();
        let _ = match self.1 {
            Some(prec) => write!(self.0, "M{x:.0$},{y:.0$}", prec),
            None => write!(self.0, "M{x},{y}"),
        };
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.maybe_push_space();
        let _ = match self.1 {
            Some(prec) => write!(self.0, "L{x:.0$},{y:.0$}", prec),
            None => write!(self.0, "L{x},{y}"),
        };
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.maybe_push_space();
        let _ = match self.1 {
            Some(prec) => write!(self.0, "Q{cx0:.0$},{cy0:.0$} {x:.0$},{y:.0$}", prec),
            None => write!(self.0, "Q{cx0},{cy0} {x},{y}"),
        };
    }

    fn close(&mut self) {
        self.maybe_push_space();
        self.0.push('Z');
    }
}

impl AsRef<str> for SvgPen {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<SvgPen> for String {
    fn from(value: SvgPen) -> Self {
        value.0
    }
}

impl fmt::Display for SvgPen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_triangle(pen: &mut impl OutlinePen) {
        pen.move_to(0.0, 0.0);
        pen.line_to(10.5, 0.0);
        pen.quad_to(10.5, 10.0, 0.0, 10.0);
        pen.close();
    }

    #[test]
    fn svg_default_formatting() {
        let mut pen = SvgPen::new();
        draw_triangle(&mut pen);
        assert_eq!(pen.as_ref(), "M0,0 L10.5,0 Q10.5,10 0,10 Z");
    }

    #[test]
    fn svg_with_precision() {
        let mut pen = SvgPen::with_precision(1);
        draw_triangle(&mut pen);
        assert_eq!(pen.to_string(), "M0.0,0.0 L10.5,0.0 Q10.5,10.0 0.0,10.0 Z");
        pen.clear();
        assert!(pen.is_empty());
    }

    #[test]
    fn collects_elements() {
        let mut elements = Vec::new();
        draw_triangle(&mut elements);
        assert_eq!(
            elements,
            vec![
                PathElement::MoveTo { x: 0.0, y: 0.0 },
                PathElement::LineTo { x: 10.5, y: 0.0 },
                PathElement::QuadTo {
                    cx0: 10.5,
                    cy0: 10.0,
                    x: 0.0,
                    y: 10.0
                },
                PathElement::Close,
            ]
        );
    }
}
