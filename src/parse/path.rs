use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{ScrawlError, ScrawlResult};

/// One drawing command with all coordinates resolved to absolute values.
///
/// Relative commands, `H`/`V` shorthands, and `S`/`T` reflected control
/// points are resolved by the parser; consumers never see them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Begin a new subpath at `to`.
    MoveTo {
        /// Subpath starting point.
        to: Point,
    },
    /// Straight segment from the current point to `to`.
    LineTo {
        /// Segment end point.
        to: Point,
    },
    /// Cubic Bézier segment from the current point to `to`.
    CubicCurveTo {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// Segment end point.
        to: Point,
    },
    /// Quadratic Bézier segment from the current point to `to`.
    QuadraticCurveTo {
        /// Control point.
        ctrl: Point,
        /// Segment end point.
        to: Point,
    },
    /// Elliptical arc segment from the current point to `to`.
    EllipticalArcTo {
        /// Ellipse radii (rx, ry).
        radii: Vec2,
        /// Rotation of the ellipse's x axis, in degrees.
        x_rotation_deg: f64,
        /// Choose the larger of the two candidate arcs.
        large_arc: bool,
        /// Sweep in the positive-angle direction.
        sweep: bool,
        /// Segment end point.
        to: Point,
    },
    /// Close the current subpath back to its starting point.
    ClosePath,
}

/// Lazy single-pass parser over an SVG path-data string.
///
/// Yields [`PathCommand`] values in source order; stops permanently after the
/// first error (`Iterator` is fused in the error case). Implicit command
/// repetition is expanded, so one source command letter with several argument
/// groups yields several items.
pub struct PathParser<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Active command letter for implicit repetition.
    cmd: Option<u8>,
    current: Point,
    subpath_start: Point,
    /// Second control point of the previous cubic, for `S` reflection.
    last_cubic_ctrl: Option<Point>,
    /// Control point of the previous quadratic, for `T` reflection.
    last_quad_ctrl: Option<Point>,
    failed: bool,
}

impl<'a> PathParser<'a> {
    /// Create a parser over the contents of a `d` attribute.
    pub fn new(path_data: &'a str) -> Self {
        Self {
            bytes: path_data.as_bytes(),
            pos: 0,
            cmd: None,
            current: Point::ZERO,
            subpath_start: Point::ZERO,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
            failed: false,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The run of non-separator bytes at the cursor, for error reporting.
    fn token_at_cursor(&self) -> String {
        let start = self.pos;
        let mut end = start;
        while let Some(&b) = self.bytes.get(end) {
            if b.is_ascii_whitespace() || b == b',' {
                break;
            }
            end += 1;
        }
        if end == start {
            return "<end of data>".to_string();
        }
        String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
    }

    fn next_number(&mut self) -> ScrawlResult<f64> {
        self.skip_separators();
        let start = self.pos;
        let mut end = start;
        if matches!(self.bytes.get(end), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let mut digits = 0usize;
        while matches!(self.bytes.get(end), Some(b) if b.is_ascii_digit()) {
            end += 1;
            digits += 1;
        }
        if self.bytes.get(end) == Some(&b'.') {
            end += 1;
            while matches!(self.bytes.get(end), Some(b) if b.is_ascii_digit()) {
                end += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(ScrawlError::malformed_path(self.token_at_cursor(), start));
        }
        if matches!(self.bytes.get(end), Some(b'e') | Some(b'E')) {
            let mut exp_end = end + 1;
            if matches!(self.bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let mut exp_digits = 0usize;
            while matches!(self.bytes.get(exp_end), Some(b) if b.is_ascii_digit()) {
                exp_end += 1;
                exp_digits += 1;
            }
            if exp_digits > 0 {
                end = exp_end;
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| ScrawlError::malformed_path(self.token_at_cursor(), start))?;
        let value = text
            .parse::<f64>()
            .map_err(|_| ScrawlError::malformed_path(text.to_string(), start))?;
        self.pos = end;
        Ok(value)
    }

    /// Arc flags are single `0`/`1` digits that may run directly into the
    /// following number ("1 0 0-20"), so they cannot share the number lexer.
    fn next_flag(&mut self) -> ScrawlResult<bool> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(ScrawlError::malformed_path(
                self.token_at_cursor(),
                self.pos,
            )),
        }
    }

    fn next_coord_pair(&mut self) -> ScrawlResult<(f64, f64)> {
        let x = self.next_number()?;
        let y = self.next_number()?;
        Ok((x, y))
    }

    fn resolve(&self, x: f64, y: f64, absolute: bool) -> Point {
        if absolute {
            Point::new(x, y)
        } else {
            Point::new(self.current.x + x, self.current.y + y)
        }
    }

    fn reflect_cubic(&self) -> Point {
        match self.last_cubic_ctrl {
            Some(c) => Point::new(
                2.0 * self.current.x - c.x,
                2.0 * self.current.y - c.y,
            ),
            None => self.current,
        }
    }

    fn reflect_quad(&self) -> Point {
        match self.last_quad_ctrl {
            Some(c) => Point::new(
                2.0 * self.current.x - c.x,
                2.0 * self.current.y - c.y,
            ),
            None => self.current,
        }
    }

    fn parse_group(&mut self, cmd: u8) -> ScrawlResult<PathCommand> {
        let absolute = cmd.is_ascii_uppercase();
        let out = match cmd.to_ascii_lowercase() {
            b'm' => {
                let (x, y) = self.next_coord_pair()?;
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.subpath_start = to;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                // Subsequent argument groups are implicit line commands.
                self.cmd = Some(if absolute { b'L' } else { b'l' });
                PathCommand::MoveTo { to }
            }
            b'l' => {
                let (x, y) = self.next_coord_pair()?;
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                PathCommand::LineTo { to }
            }
            b'h' => {
                let v = self.next_number()?;
                let x = if absolute { v } else { self.current.x + v };
                let to = Point::new(x, self.current.y);
                self.current = to;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                PathCommand::LineTo { to }
            }
            b'v' => {
                let v = self.next_number()?;
                let y = if absolute { v } else { self.current.y + v };
                let to = Point::new(self.current.x, y);
                self.current = to;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                PathCommand::LineTo { to }
            }
            b'c' => {
                let (x1, y1) = self.next_coord_pair()?;
                let (x2, y2) = self.next_coord_pair()?;
                let (x, y) = self.next_coord_pair()?;
                let ctrl1 = self.resolve(x1, y1, absolute);
                let ctrl2 = self.resolve(x2, y2, absolute);
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_cubic_ctrl = Some(ctrl2);
                self.last_quad_ctrl = None;
                PathCommand::CubicCurveTo { ctrl1, ctrl2, to }
            }
            b's' => {
                let ctrl1 = self.reflect_cubic();
                let (x2, y2) = self.next_coord_pair()?;
                let (x, y) = self.next_coord_pair()?;
                let ctrl2 = self.resolve(x2, y2, absolute);
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_cubic_ctrl = Some(ctrl2);
                self.last_quad_ctrl = None;
                PathCommand::CubicCurveTo { ctrl1, ctrl2, to }
            }
            b'q' => {
                let (x1, y1) = self.next_coord_pair()?;
                let (x, y) = self.next_coord_pair()?;
                let ctrl = self.resolve(x1, y1, absolute);
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_quad_ctrl = Some(ctrl);
                self.last_cubic_ctrl = None;
                PathCommand::QuadraticCurveTo { ctrl, to }
            }
            b't' => {
                let ctrl = self.reflect_quad();
                let (x, y) = self.next_coord_pair()?;
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_quad_ctrl = Some(ctrl);
                self.last_cubic_ctrl = None;
                PathCommand::QuadraticCurveTo { ctrl, to }
            }
            b'a' => {
                let rx = self.next_number()?;
                let ry = self.next_number()?;
                let x_rotation_deg = self.next_number()?;
                let large_arc = self.next_flag()?;
                let sweep = self.next_flag()?;
                let (x, y) = self.next_coord_pair()?;
                let to = self.resolve(x, y, absolute);
                self.current = to;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                PathCommand::EllipticalArcTo {
                    radii: Vec2::new(rx.abs(), ry.abs()),
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                }
            }
            b'z' => {
                self.current = self.subpath_start;
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                // A bare number after Z has no command to repeat.
                self.cmd = None;
                PathCommand::ClosePath
            }
            _ => {
                return Err(ScrawlError::malformed_path(
                    String::from_utf8_lossy(&[cmd]).into_owned(),
                    self.pos.saturating_sub(1),
                ));
            }
        };
        Ok(out)
    }
}

const COMMAND_LETTERS: &[u8] = b"MmLlHhVvCcSsQqTtAaZz";

impl Iterator for PathParser<'_> {
    type Item = ScrawlResult<PathCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_separators();
        let next_byte = self.peek()?;

        let cmd = if next_byte.is_ascii_alphabetic() {
            if !COMMAND_LETTERS.contains(&next_byte) {
                self.failed = true;
                return Some(Err(ScrawlError::malformed_path(
                    self.token_at_cursor(),
                    self.pos,
                )));
            }
            self.pos += 1;
            self.cmd = Some(next_byte);
            next_byte
        } else {
            match self.cmd {
                Some(c) => c,
                None => {
                    self.failed = true;
                    return Some(Err(ScrawlError::malformed_path(
                        self.token_at_cursor(),
                        self.pos,
                    )));
                }
            }
        };

        let result = self.parse_group(cmd);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Parse an entire path-data string eagerly.
///
/// Convenience wrapper over [`PathParser`] for callers that do not need the
/// lazy iterator.
pub fn parse_path(path_data: &str) -> ScrawlResult<Vec<PathCommand>> {
    PathParser::new(path_data).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/parse/path.rs"]
mod tests;
