//! Position tweens: straight lines, jump arcs, and Bézier paths.
//!
//! Every tween here captures the target's position in `begin` and computes
//! the new position purely from `t`, so re-running a restarted tween picks
//! up wherever the target currently stands.

use std::f64::consts::PI;

use crate::error::{MotionError, Result};
use crate::interval::{BoxedInterval, IntervalAction, validate_duration};
use crate::target::{Target, Vec2};

/// Linear motion to an absolute position.
#[derive(Debug, Clone)]
pub struct MoveTo {
    end: Vec2,
    duration: f64,
    start: Vec2,
    delta: Vec2,
}

impl MoveTo {
    pub fn new(position: impl Into<Vec2>, duration: f64) -> Result<Self> {
        Ok(Self {
            end: position.into(),
            duration: validate_duration(duration)?,
            start: Vec2::ZERO,
            delta: Vec2::ZERO,
        })
    }
}

impl IntervalAction for MoveTo {
    fn name(&self) -> &'static str {
        "MoveTo"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start = Vec2::new(target.x(), target.y());
        self.delta = self.end - self.start;
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_x(self.start.x + self.delta.x * t);
        target.set_y(self.start.y + self.delta.y * t);
        Ok(())
    }
}

/// Linear motion by a relative displacement.
///
/// The absolute end position is computed from the captured start plus the
/// delta when the action starts. Reversing negates the delta.
#[derive(Debug, Clone)]
pub struct MoveBy {
    delta: Vec2,
    duration: f64,
    start: Vec2,
}

impl MoveBy {
    pub fn new(delta: impl Into<Vec2>, duration: f64) -> Result<Self> {
        Ok(Self {
            delta: delta.into(),
            duration: validate_duration(duration)?,
            start: Vec2::ZERO,
        })
    }
}

impl IntervalAction for MoveBy {
    fn name(&self) -> &'static str {
        "MoveBy"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start = Vec2::new(target.x(), target.y());
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_x(self.start.x + self.delta.x * t);
        target.set_y(self.start.y + self.delta.y * t);
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self::new(self.delta.neg(), self.duration)?))
    }
}

/// Relative motion with `jumps` rectified-sine bounces of the given height
/// layered on top of the linear displacement.
#[derive(Debug, Clone)]
pub struct JumpBy {
    delta: Vec2,
    height: f64,
    jumps: u32,
    duration: f64,
    start: Vec2,
}

impl JumpBy {
    pub fn new(delta: impl Into<Vec2>, height: f64, jumps: u32, duration: f64) -> Result<Self> {
        if jumps == 0 {
            return Err(MotionError::invalid_argument(
                "jump count must be at least 1",
            ));
        }
        if !height.is_finite() {
            return Err(MotionError::invalid_argument("jump height must be finite"));
        }
        Ok(Self {
            delta: delta.into(),
            height,
            jumps,
            duration: validate_duration(duration)?,
            start: Vec2::ZERO,
        })
    }
}

impl IntervalAction for JumpBy {
    fn name(&self) -> &'static str {
        "JumpBy"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start = Vec2::new(target.x(), target.y());
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let arc = self.height * (t * PI * f64::from(self.jumps)).sin().abs();
        target.set_x(self.start.x + self.delta.x * t);
        target.set_y(self.start.y + self.delta.y * t + arc);
        Ok(())
    }
}

/// [`JumpBy`] toward an absolute destination; the displacement is computed
/// from the captured start position.
#[derive(Debug, Clone)]
pub struct JumpTo {
    destination: Vec2,
    inner: JumpBy,
}

impl JumpTo {
    pub fn new(
        destination: impl Into<Vec2>,
        height: f64,
        jumps: u32,
        duration: f64,
    ) -> Result<Self> {
        let destination = destination.into();
        Ok(Self {
            destination,
            inner: JumpBy::new(Vec2::ZERO, height, jumps, duration)?,
        })
    }
}

impl IntervalAction for JumpTo {
    fn name(&self) -> &'static str {
        "JumpTo"
    }

    fn duration(&self) -> f64 {
        self.inner.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.inner.begin(target)?;
        self.inner.delta = self.destination - self.inner.start;
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        self.inner.update(target, t)
    }
}

/// Motion along a cubic Bézier curve in target-relative coordinates.
///
/// The four control points are offsets from the captured start position;
/// reversing traverses the control points in the opposite order.
#[derive(Debug, Clone)]
pub struct Bezier {
    points: [Vec2; 4],
    duration: f64,
    start: Vec2,
}

impl Bezier {
    pub fn new(points: [Vec2; 4], duration: f64) -> Result<Self> {
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(MotionError::invalid_argument(
                "bezier control points must be finite",
            ));
        }
        Ok(Self {
            points,
            duration: validate_duration(duration)?,
            start: Vec2::ZERO,
        })
    }

    /// Evaluate the relative curve position at `t` via the expanded cubic
    /// polynomial.
    fn at(&self, t: f64) -> Vec2 {
        let [p0, p1, p2, p3] = self.points;

        let cx = 3.0 * (p1.x - p0.x);
        let bx = 3.0 * (p2.x - p1.x) - cx;
        let ax = p3.x - p0.x - cx - bx;
        let cy = 3.0 * (p1.y - p0.y);
        let by = 3.0 * (p2.y - p1.y) - cy;
        let ay = p3.y - p0.y - cy - by;

        let t2 = t * t;
        let t3 = t2 * t;
        Vec2::new(
            ax * t3 + bx * t2 + cx * t + p0.x,
            ay * t3 + by * t2 + cy * t + p0.y,
        )
    }
}

impl IntervalAction for Bezier {
    fn name(&self) -> &'static str {
        "Bezier"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start = Vec2::new(target.x(), target.y());
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let p = self.at(t);
        target.set_x(self.start.x + p.x);
        target.set_y(self.start.y + p.y);
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        let [p0, p1, p2, p3] = self.points;
        Ok(Box::new(Self::new([p3, p2, p1, p0], self.duration)?))
    }
}
