//! Action lifecycle contract and tree-building helpers.
//!
//! Every node in an action tree — leaf tween, leaf instant, combinator, or
//! modifier — implements [`Action`]. The driver walks one tree per target:
//! `start` once, `step(dt)` once per tick, `done` to poll, `stop` exactly
//! once at the end (early or not).
//!
//! Trees are built with the [`sequence`], [`parallel`], [`repeat`], and
//! [`repeat_forever`] constructors; [`ActionExt`] adds `then`/`alongside`
//! chaining as sugar over the same combinators.

use crate::composite::{Loop, Repeat, Sequence, Spawn};
use crate::error::{MotionError, Result};
use crate::target::Target;

/// A heterogeneous action tree node.
pub type BoxedAction = Box<dyn Action>;

/// A stateful node that mutates a target incrementally over time ticks.
///
/// # Lifecycle
///
/// `start` → zero or more `step(dt)` → `stop`. Restarting a stopped action
/// resets its elapsed time and completion state from scratch. Calling `step`
/// before `start` is a programmer error and panics.
pub trait Action {
    /// Bind to the target and initialize internal timing state.
    ///
    /// Instant actions perform their entire mutation here and complete
    /// immediately.
    fn start(&mut self, target: &mut dyn Target) -> Result<()>;

    /// Advance elapsed time by `dt` seconds, updating the target.
    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()>;

    /// Whether the action has run to completion. Pure query.
    fn done(&self) -> bool;

    /// Release the target. Safe to call on completed actions; composites
    /// recursively stop their active descendants.
    fn stop(&mut self, target: &mut dyn Target);

    /// Build a new, independent action tree that undoes this action's
    /// forward motion when run from the same starting target state.
    fn reversed(&self) -> Result<BoxedAction> {
        Err(MotionError::NotReversible {
            action: self.name(),
        })
    }

    /// Short type name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Run `children` one after another.
///
/// A single-element list collapses to that element unchanged; an empty list
/// is rejected.
pub fn sequence(children: Vec<BoxedAction>) -> Result<BoxedAction> {
    match children.len() {
        0 => Err(MotionError::invalid_argument(
            "sequence requires at least one child action",
        )),
        1 => {
            let mut children = children;
            Ok(children.pop().expect("length checked above"))
        }
        _ => Ok(Box::new(Sequence::new(children))),
    }
}

/// Run `children` simultaneously against the same target.
///
/// Always produces a `Spawn`, even for children touching disjoint
/// attributes; its effective duration is the maximum of its children's.
pub fn parallel(children: Vec<BoxedAction>) -> Result<BoxedAction> {
    if children.is_empty() {
        return Err(MotionError::invalid_argument(
            "parallel requires at least one child action",
        ));
    }
    Ok(Box::new(Spawn::new(children)))
}

/// Run `action` a fixed number of times.
///
/// `times == 1` returns the action unchanged; `times == 0` is rejected.
pub fn repeat(action: BoxedAction, times: u32) -> Result<BoxedAction> {
    match times {
        0 => Err(MotionError::invalid_argument(
            "repeat count must be at least 1",
        )),
        1 => Ok(action),
        _ => Ok(Box::new(Loop::new(action, times))),
    }
}

/// Run `action` until externally cancelled. Never completes on its own.
pub fn repeat_forever(action: BoxedAction) -> BoxedAction {
    Box::new(Repeat::new(action))
}

/// Chaining sugar over [`sequence`] and [`parallel`].
pub trait ActionExt {
    /// `self`, then `next`.
    fn then(self, next: BoxedAction) -> BoxedAction;

    /// `self` and `other` in parallel.
    fn alongside(self, other: BoxedAction) -> BoxedAction;
}

impl ActionExt for BoxedAction {
    fn then(self, next: BoxedAction) -> BoxedAction {
        Box::new(Sequence::new(vec![self, next]))
    }

    fn alongside(self, other: BoxedAction) -> BoxedAction {
        Box::new(Spawn::new(vec![self, other]))
    }
}
