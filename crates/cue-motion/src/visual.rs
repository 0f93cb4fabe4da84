//! Rotation, opacity, scale, and visibility tweens.

use crate::error::{MotionError, Result};
use crate::interval::{BoxedInterval, IntervalAction, validate_duration};
use crate::target::{Target, clamp_opacity};

/// Rotate by a relative angle in degrees; the written angle is wrapped
/// into `[0, 360)`. Reversing negates the angle.
#[derive(Debug, Clone)]
pub struct RotateBy {
    angle: f64,
    duration: f64,
    start_angle: f64,
}

impl RotateBy {
    pub fn new(angle: f64, duration: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(MotionError::invalid_argument("angle must be finite"));
        }
        Ok(Self {
            angle,
            duration: validate_duration(duration)?,
            start_angle: 0.0,
        })
    }
}

impl IntervalAction for RotateBy {
    fn name(&self) -> &'static str {
        "RotateBy"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start_angle = target.rotation();
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_rotation((self.start_angle + self.angle * t).rem_euclid(360.0));
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self::new(-self.angle, self.duration)?))
    }
}

/// Rotate to an absolute angle, always turning the short way.
///
/// The shortest signed delta is computed from the captured start angle and
/// constrained to `(-180, 180]`. The reverse rotates back to the captured
/// start angle, so it only exists once the action has run.
#[derive(Debug, Clone)]
pub struct RotateTo {
    end_angle: f64,
    duration: f64,
    start_angle: Option<f64>,
    delta: f64,
}

impl RotateTo {
    pub fn new(angle: f64, duration: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(MotionError::invalid_argument("angle must be finite"));
        }
        Ok(Self {
            end_angle: angle.rem_euclid(360.0),
            duration: validate_duration(duration)?,
            start_angle: None,
            delta: 0.0,
        })
    }
}

impl IntervalAction for RotateTo {
    fn name(&self) -> &'static str {
        "RotateTo"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        let start = target.rotation().rem_euclid(360.0);
        self.start_angle = Some(start);

        let mut delta = self.end_angle - start;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta <= -180.0 {
            delta += 360.0;
        }
        self.delta = delta;
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let start = self.start_angle.unwrap_or(self.end_angle);
        target.set_rotation((start + self.delta * t).rem_euclid(360.0));
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        match self.start_angle {
            Some(start) => Ok(Box::new(Self::new(start, self.duration)?)),
            None => Err(MotionError::NotReversible {
                action: "RotateTo (not yet started)",
            }),
        }
    }
}

/// Linear ramp of opacity to a fixed endpoint, from the captured start.
#[derive(Debug, Clone)]
pub struct FadeTo {
    end_alpha: u8,
    duration: f64,
    start_alpha: f64,
}

impl FadeTo {
    pub fn new(alpha: u8, duration: f64) -> Result<Self> {
        Ok(Self {
            end_alpha: alpha,
            duration: validate_duration(duration)?,
            start_alpha: 0.0,
        })
    }
}

impl IntervalAction for FadeTo {
    fn name(&self) -> &'static str {
        "FadeTo"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start_alpha = f64::from(target.opacity());
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let alpha = self.start_alpha + (f64::from(self.end_alpha) - self.start_alpha) * t;
        target.set_opacity(clamp_opacity(alpha));
        Ok(())
    }
}

/// Ramp opacity from fully opaque down to zero. Reverse of [`FadeIn`].
#[derive(Debug, Clone)]
pub struct FadeOut {
    duration: f64,
}

impl FadeOut {
    pub fn new(duration: f64) -> Result<Self> {
        Ok(Self {
            duration: validate_duration(duration)?,
        })
    }
}

impl IntervalAction for FadeOut {
    fn name(&self) -> &'static str {
        "FadeOut"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_opacity(clamp_opacity(255.0 * (1.0 - t)));
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(FadeIn::new(self.duration)?))
    }
}

/// Ramp opacity from zero up to fully opaque. Reverse of [`FadeOut`].
#[derive(Debug, Clone)]
pub struct FadeIn {
    duration: f64,
}

impl FadeIn {
    pub fn new(duration: f64) -> Result<Self> {
        Ok(Self {
            duration: validate_duration(duration)?,
        })
    }
}

impl IntervalAction for FadeIn {
    fn name(&self) -> &'static str {
        "FadeIn"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_opacity(clamp_opacity(255.0 * t));
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(FadeOut::new(self.duration)?))
    }
}

/// Interpolate uniform scale to an absolute factor.
#[derive(Debug, Clone)]
pub struct ScaleTo {
    end_scale: f64,
    duration: f64,
    start_scale: f64,
}

impl ScaleTo {
    pub fn new(scale: f64, duration: f64) -> Result<Self> {
        if !scale.is_finite() {
            return Err(MotionError::invalid_argument("scale must be finite"));
        }
        Ok(Self {
            end_scale: scale,
            duration: validate_duration(duration)?,
            start_scale: 1.0,
        })
    }
}

impl IntervalAction for ScaleTo {
    fn name(&self) -> &'static str {
        "ScaleTo"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start_scale = target.scale();
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_scale(self.start_scale + (self.end_scale - self.start_scale) * t);
        Ok(())
    }
}

/// Multiply uniform scale by a factor; the end scale is the captured start
/// times the multiplier. Reversing inverts the multiplier.
#[derive(Debug, Clone)]
pub struct ScaleBy {
    factor: f64,
    duration: f64,
    start_scale: f64,
    end_scale: f64,
}

impl ScaleBy {
    pub fn new(factor: f64, duration: f64) -> Result<Self> {
        if !factor.is_finite() || factor == 0.0 {
            return Err(MotionError::invalid_argument(
                "scale factor must be finite and non-zero",
            ));
        }
        Ok(Self {
            factor,
            duration: validate_duration(duration)?,
            start_scale: 1.0,
            end_scale: 1.0,
        })
    }
}

impl IntervalAction for ScaleBy {
    fn name(&self) -> &'static str {
        "ScaleBy"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.start_scale = target.scale();
        self.end_scale = self.start_scale * self.factor;
        Ok(())
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_scale(self.start_scale + (self.end_scale - self.start_scale) * t);
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self::new(1.0 / self.factor, self.duration)?))
    }
}

/// Toggle visibility on a duty cycle: visible for the first half and hidden
/// for the second half of each of `times` equal sub-intervals. Self-inverse.
#[derive(Debug, Clone)]
pub struct Blink {
    times: u32,
    duration: f64,
}

impl Blink {
    pub fn new(times: u32, duration: f64) -> Result<Self> {
        if times == 0 {
            return Err(MotionError::invalid_argument(
                "blink count must be at least 1",
            ));
        }
        Ok(Self {
            times,
            duration: validate_duration(duration)?,
        })
    }
}

impl IntervalAction for Blink {
    fn name(&self) -> &'static str {
        "Blink"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let slice = 1.0 / f64::from(self.times);
        let phase = t % slice;
        target.set_visible(phase < slice / 2.0);
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(self.clone()))
    }
}
