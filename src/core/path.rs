use std::fmt;

use serde::{Deserialize, Serialize};

/// Vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(PathPoint),
    LineTo(PathPoint),
    QuadTo { control: PathPoint, to: PathPoint },
    Close,
}

impl PathCommand {
    /// End point of the command, if it has one.
    #[must_use]
    pub fn end_point(self) -> Option<PathPoint> {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => Some(point),
            Self::QuadTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M{},{}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L{},{}", p.x, p.y),
            Self::QuadTo { control, to } => {
                write!(f, "Q{},{} {},{}", control.x, control.y, to.x, to.y)
            }
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Ordered drawing instructions for one path.
///
/// `Display` emits SVG path syntax (`M10,20 L30,40 Z`), so the same value can
/// feed vector backends and exact-string assertions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, point: PathPoint) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: PathPoint) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn quad_to(&mut self, control: PathPoint, to: PathPoint) {
        self.commands.push(PathCommand::QuadTo { control, to });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(|command| match command {
            PathCommand::MoveTo(point) | PathCommand::LineTo(point) => point.is_finite(),
            PathCommand::QuadTo { control, to } => control.is_finite() && to.is_finite(),
            PathCommand::Close => true,
        })
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, command) in self.commands.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
