//! SVG path data builder and compact number formatting.
//!
//! Every generator writes coordinates through [`write_num`], so all emitted
//! markup shares one number format: integers without a fraction, other
//! values rounded to the builder precision with trailing zeros removed.

use std::fmt::Write;

/// Default number of decimals kept in emitted coordinates.
pub const DEFAULT_PRECISION: u32 = 2;

/// Write a number with the default precision.
///
/// # Examples
///
/// ```
/// use slideshape::geometry::path::write_num;
///
/// let mut buf = String::new();
/// write_num(&mut buf, 10.0);
/// buf.push(' ');
/// write_num(&mut buf, 10.126);
/// assert_eq!(buf, "10 10.13");
/// ```
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    write_num_prec(buf, n, DEFAULT_PRECISION);
}

/// Write a number rounded to `precision` decimals.
///
/// Non-finite values are written as `0` so callers never emit `NaN`.
pub fn write_num_prec(buf: &mut String, n: f64, precision: u32) {
    if !n.is_finite() {
        buf.push('0');
        return;
    }

    let factor = 10f64.powi(precision as i32);
    let rounded = (n * factor).round() / factor;

    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        let mut ibuf = itoa::Buffer::new();
        buf.push_str(ibuf.format(rounded as i64));
    } else {
        let mut fbuf = ryu::Buffer::new();
        let s = fbuf.format(rounded);
        if s.contains('.') && !s.contains('e') {
            buf.push_str(s.trim_end_matches('0').trim_end_matches('.'));
        } else {
            buf.push_str(s);
        }
    }
}

/// Path command type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

/// SVG path data builder.
///
/// Unlike a minifier, every command keeps its letter so the path stays
/// readable and each vertex is countable in the output.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    precision: u32,
}

impl PathBuilder {
    /// Create new path builder
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Set decimal precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::MoveTo { x, y });
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::LineTo { x, y });
        self
    }

    pub fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { x1, y1, x, y });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            x,
            y,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Number of commands pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Build the SVG path data string
    pub fn build(&self) -> String {
        let mut out = String::with_capacity(self.commands.len() * 12);

        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match *cmd {
                PathCommand::MoveTo { x, y } => {
                    out.push('M');
                    self.write_coords(&mut out, &[x, y]);
                },
                PathCommand::LineTo { x, y } => {
                    out.push('L');
                    self.write_coords(&mut out, &[x, y]);
                },
                PathCommand::QuadTo { x1, y1, x, y } => {
                    out.push('Q');
                    self.write_coords(&mut out, &[x1, y1, x, y]);
                },
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    out.push('A');
                    self.write_coords(&mut out, &[rx, ry, rotation]);
                    let _ = write!(
                        out,
                        " {} {} ",
                        if large_arc { '1' } else { '0' },
                        if sweep { '1' } else { '0' }
                    );
                    self.write_coords(&mut out, &[x, y]);
                },
                PathCommand::Close => out.push('z'),
            }
        }

        out
    }

    fn write_coords(&self, out: &mut String, coords: &[f64]) {
        for (i, &val) in coords.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write_num_prec(out, val, self.precision);
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_num() {
        let mut buf = String::new();
        write_num(&mut buf, 10.0);
        assert_eq!(buf, "10");

        buf.clear();
        write_num(&mut buf, 10.5);
        assert_eq!(buf, "10.5");

        buf.clear();
        write_num(&mut buf, 10.123);
        assert_eq!(buf, "10.12");

        buf.clear();
        write_num(&mut buf, -0.001);
        assert_eq!(buf, "0");

        buf.clear();
        write_num(&mut buf, f64::NAN);
        assert_eq!(buf, "0");
    }

    #[test]
    fn test_simple_path() {
        let mut builder = PathBuilder::new();
        builder.move_to(10.0, 20.0).line_to(30.0, 40.0).close();
        assert_eq!(builder.build(), "M10 20 L30 40 z");
    }

    #[test]
    fn test_arc_and_quad() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(0.0, 0.0)
            .arc(5.0, 5.0, 0.0, true, true, 10.0, 0.0)
            .quad_to(10.0, 10.0, 0.0, 10.0);
        assert_eq!(builder.build(), "M0 0 A5 5 0 1 1 10 0 Q10 10 0 10");
    }

    #[test]
    fn test_precision() {
        let mut builder = PathBuilder::new().with_precision(1);
        builder.move_to(10.123, 20.567).line_to(30.89, 40.12);
        assert_eq!(builder.build(), "M10.1 20.6 L30.9 40.1");
    }
}
