//! Driver layer: owns started action trees and ticks them to completion.
//!
//! A [`Runner`] binds one action tree to its lifecycle, guaranteeing start
//! before the first step and exactly one stop at the end, whether the tree
//! finishes on its own or is cancelled. The [`Scheduler`] multiplexes many
//! runners over a shared target and retires them as they finish.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::action::BoxedAction;
use crate::error::Result;
use crate::target::Target;

static NEXT_ACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle identifying one scheduled action tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u64);

impl ActionId {
    fn next() -> Self {
        Self(NEXT_ACTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One action tree bound to its lifecycle.
///
/// Attaching starts the tree; advancing steps it until it reports done, at
/// which point the runner stops it and retires. Advancing a retired runner
/// is a programmer error and panics.
pub struct Runner {
    action: BoxedAction,
    stopped: bool,
}

impl Runner {
    /// Start `action` against `target` and take ownership of its lifecycle.
    pub fn attach(mut action: BoxedAction, target: &mut dyn Target) -> Result<Self> {
        action.start(target)?;
        Ok(Self {
            action,
            stopped: false,
        })
    }

    /// Step the tree by `dt` seconds. Returns whether the tree finished and
    /// was retired during this call.
    pub fn advance(&mut self, target: &mut dyn Target, dt: f64) -> Result<bool> {
        assert!(
            !self.stopped,
            "advance() called on a retired '{}' runner",
            self.action.name()
        );
        self.action.step(target, dt)?;
        if self.action.done() {
            self.action.stop(target);
            self.stopped = true;
        }
        Ok(self.stopped)
    }

    /// Whether the tree has finished and been stopped.
    pub fn done(&self) -> bool {
        self.stopped
    }

    /// Stop the tree early. Stop is delivered at most once; cancelling a
    /// retired runner is a no-op.
    pub fn cancel(&mut self, target: &mut dyn Target) {
        if !self.stopped {
            self.action.stop(target);
            self.stopped = true;
        }
    }

    /// Short type name of the owned tree's root, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.action.name()
    }
}

/// Ticks a set of runners against one target and retires finished ones.
#[derive(Default)]
pub struct Scheduler {
    active: Vec<(ActionId, Runner)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `action` against `target` and track it until it finishes or is
    /// cancelled.
    pub fn run(&mut self, action: BoxedAction, target: &mut dyn Target) -> Result<ActionId> {
        let id = ActionId::next();
        debug!(id = id.0, action = action.name(), "scheduling action");
        let runner = Runner::attach(action, target)?;
        self.active.push((id, runner));
        Ok(id)
    }

    /// Advance every active runner by `dt` seconds, dropping the ones that
    /// finish this tick.
    pub fn update(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        let mut index = 0;
        while index < self.active.len() {
            let (id, runner) = &mut self.active[index];
            trace!(id = id.0, action = runner.name(), "advancing action");
            if runner.advance(target, dt)? {
                debug!(id = id.0, action = runner.name(), "action finished");
                self.active.swap_remove(index);
            } else {
                index += 1;
            }
        }
        Ok(())
    }

    /// Stop and drop one runner. Returns whether `id` was active.
    pub fn cancel(&mut self, id: ActionId, target: &mut dyn Target) -> bool {
        if let Some(index) = self.active.iter().position(|(active, _)| *active == id) {
            let (_, mut runner) = self.active.swap_remove(index);
            debug!(id = id.0, action = runner.name(), "cancelling action");
            runner.cancel(target);
            true
        } else {
            false
        }
    }

    /// Stop and drop every runner.
    pub fn cancel_all(&mut self, target: &mut dyn Target) {
        for (id, runner) in &mut self.active {
            debug!(id = id.0, action = runner.name(), "cancelling action");
            runner.cancel(target);
        }
        self.active.clear();
    }

    /// Number of runners still in flight.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}
