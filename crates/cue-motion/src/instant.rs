//! Zero-duration actions: atomic mutations that complete inside `start`.
//!
//! An instant performs its entire effect exactly once, at start time, and
//! reports done immediately; `step` and `stop` are no-ops, so a driver that
//! keeps ticking an already-finished instant cannot re-trigger it.

use crate::action::{Action, BoxedAction};
use crate::error::{MotionError, Result};
use crate::target::{Target, Vec2};

/// Set the target's position immediately.
#[derive(Debug, Clone)]
pub struct Place {
    position: Vec2,
    done: bool,
}

impl Place {
    pub fn new(position: impl Into<Vec2>) -> Self {
        Self {
            position: position.into(),
            done: false,
        }
    }
}

impl Action for Place {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        target.set_x(self.position.x);
        target.set_y(self.position.y);
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn name(&self) -> &'static str {
        "Place"
    }
}

/// Make the target visible immediately. Reverse of [`Hide`].
#[derive(Debug, Clone, Default)]
pub struct Show {
    done: bool,
}

impl Show {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for Show {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        target.set_visible(true);
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn reversed(&self) -> Result<BoxedAction> {
        Ok(Box::new(Hide::new()))
    }

    fn name(&self) -> &'static str {
        "Show"
    }
}

/// Hide the target immediately. Reverse of [`Show`].
#[derive(Debug, Clone, Default)]
pub struct Hide {
    done: bool,
}

impl Hide {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for Hide {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        target.set_visible(false);
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn reversed(&self) -> Result<BoxedAction> {
        Ok(Box::new(Show::new()))
    }

    fn name(&self) -> &'static str {
        "Hide"
    }
}

/// Flip the target's visibility flag immediately.
#[derive(Debug, Clone, Default)]
pub struct ToggleVisibility {
    done: bool,
}

impl ToggleVisibility {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for ToggleVisibility {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        let visible = target.visible();
        target.set_visible(!visible);
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn name(&self) -> &'static str {
        "ToggleVisibility"
    }
}

/// Invoke an external callback immediately.
///
/// The callback is opaque; a failure aborts the owning tree's `start` as a
/// [`MotionError::Callback`] without being swallowed or retried.
pub struct CallFunc {
    callback: Box<dyn FnMut() -> anyhow::Result<()>>,
    done: bool,
}

impl CallFunc {
    pub fn new(callback: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            done: false,
        }
    }
}

impl Action for CallFunc {
    fn start(&mut self, _target: &mut dyn Target) -> Result<()> {
        (self.callback)().map_err(MotionError::Callback)?;
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn name(&self) -> &'static str {
        "CallFunc"
    }
}

impl std::fmt::Debug for CallFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallFunc").field("done", &self.done).finish()
    }
}

/// [`CallFunc`] variant that passes the bound target to the callback.
pub struct CallFuncWith {
    callback: Box<dyn FnMut(&mut dyn Target) -> anyhow::Result<()>>,
    done: bool,
}

impl CallFuncWith {
    pub fn new(callback: impl FnMut(&mut dyn Target) -> anyhow::Result<()> + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            done: false,
        }
    }
}

impl Action for CallFuncWith {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        (self.callback)(target).map_err(MotionError::Callback)?;
        self.done = true;
        Ok(())
    }

    fn step(&mut self, _target: &mut dyn Target, _dt: f64) -> Result<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, _target: &mut dyn Target) {}

    fn name(&self) -> &'static str {
        "CallFuncWith"
    }
}

impl std::fmt::Debug for CallFuncWith {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallFuncWith")
            .field("done", &self.done)
            .finish()
    }
}
