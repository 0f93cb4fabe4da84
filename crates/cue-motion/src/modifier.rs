//! Timing-curve modifiers wrapping a single interval action.
//!
//! A modifier owns exactly one wrapped interval action and reshapes either
//! its effective duration ([`Speed`]) or the progress value it receives
//! ([`Accelerate`], [`AccelDecel`]). Modifiers never touch the target
//! themselves, and reversing a modifier reverses the wrapped action.

use crate::error::{MotionError, Result};
use crate::interval::{BoxedInterval, IntervalAction};
use crate::target::Target;

/// Steepness of the [`AccelDecel`] sigmoid; brings the curve to ~0 and ~1
/// at the interval's endpoints.
const SIGMOID_STEEPNESS: f64 = 12.0;

/// Uniformly compress or dilate the wrapped action's timeline.
///
/// The outer duration is `inner / factor`; the progress passed through is
/// unchanged, so the trajectory shape is identical.
pub struct Speed {
    inner: BoxedInterval,
    factor: f64,
}

impl Speed {
    pub fn new(inner: impl IntervalAction + 'static, factor: f64) -> Result<Self> {
        Self::from_boxed(Box::new(inner), factor)
    }

    fn from_boxed(inner: BoxedInterval, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MotionError::invalid_argument(
                "speed factor must be finite and positive",
            ));
        }
        Ok(Self { inner, factor })
    }
}

impl IntervalAction for Speed {
    fn name(&self) -> &'static str {
        "Speed"
    }

    fn duration(&self) -> f64 {
        self.inner.duration() / self.factor
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.inner.begin(target)
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        self.inner.update(target, t)
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self::from_boxed(
            self.inner.reversed_interval()?,
            self.factor,
        )?))
    }
}

/// Remap progress through a power curve, easing in (`rate > 1`) or out
/// (`rate < 1`) without changing the duration.
pub struct Accelerate {
    inner: BoxedInterval,
    rate: f64,
}

impl Accelerate {
    pub fn new(inner: impl IntervalAction + 'static, rate: f64) -> Result<Self> {
        Self::from_boxed(Box::new(inner), rate)
    }

    fn from_boxed(inner: BoxedInterval, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(MotionError::invalid_argument(
                "acceleration rate must be finite and positive",
            ));
        }
        Ok(Self { inner, rate })
    }
}

impl IntervalAction for Accelerate {
    fn name(&self) -> &'static str {
        "Accelerate"
    }

    fn duration(&self) -> f64 {
        self.inner.duration()
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.inner.begin(target)
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        self.inner.update(target, t.powf(self.rate))
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self::from_boxed(
            self.inner.reversed_interval()?,
            1.0 / self.rate,
        )?))
    }
}

/// Remap progress through a logistic sigmoid centered at `t = 0.5`,
/// easing in and out without changing the duration.
///
/// `t == 1` passes through unchanged so the wrapped action still receives
/// an exact endpoint.
pub struct AccelDecel {
    inner: BoxedInterval,
}

impl AccelDecel {
    pub fn new(inner: impl IntervalAction + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl IntervalAction for AccelDecel {
    fn name(&self) -> &'static str {
        "AccelDecel"
    }

    fn duration(&self) -> f64 {
        self.inner.duration()
    }

    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        self.inner.begin(target)
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        let eased = if t == 1.0 {
            t
        } else {
            1.0 / (1.0 + (-(t - 0.5) * SIGMOID_STEEPNESS).exp())
        };
        self.inner.update(target, eased)
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(Self {
            inner: self.inner.reversed_interval()?,
        }))
    }
}
