//! Composable, time-stepped actions for animating scene objects.
//!
//! An action is a small state machine that mutates a target over discrete
//! time ticks. Leaf actions either interpolate an attribute over a fixed
//! duration (movement, rotation, fades, scaling) or apply an atomic
//! mutation instantly (placement, visibility, callbacks). Combinators
//! compose them into trees that run sequentially, in parallel, or in loops,
//! and modifiers reshape a wrapped action's timing curve without touching
//! the target themselves.
//!
//! ```text
//! Scheduler ── Runner ── Action tree
//!                          ├─ Sequence / Spawn / Loop / Repeat
//!                          ├─ Interval ── IntervalAction (tweens, Delay)
//!                          │                └─ Speed / Accelerate / AccelDecel
//!                          └─ instants (Place, Show, CallFunc, ...)
//! ```
//!
//! The [`Scheduler`] is the reference driver: it starts trees against a
//! [`Target`], ticks them with a caller-supplied `dt`, and guarantees each
//! tree is stopped exactly once. Embedders with their own frame loop can
//! drive [`Runner`]s, or the [`Action`] lifecycle, directly.
//!
//! ```
//! use cue_motion::{ActionExt, IntervalAction, MoveBy, FadeOut, Node, Scheduler};
//!
//! # fn main() -> cue_motion::Result<()> {
//! let mut node = Node::at(0.0, 0.0);
//! let action = MoveBy::new((100.0, 0.0), 2.0)?
//!     .into_action()
//!     .alongside(FadeOut::new(2.0)?.into_action());
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.run(action, &mut node)?;
//! while !scheduler.is_idle() {
//!     scheduler.update(&mut node, 1.0 / 60.0)?;
//! }
//! assert!((node.x - 100.0).abs() < 1e-6);
//! assert_eq!(node.opacity, 0);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod composite;
pub mod error;
pub mod instant;
pub mod interval;
pub mod modifier;
pub mod motion;
pub mod scheduler;
pub mod target;
pub mod visual;

pub use action::{Action, ActionExt, BoxedAction, parallel, repeat, repeat_forever, sequence};
pub use composite::{Loop, Repeat, Sequence, Spawn};
pub use error::{MotionError, Result};
pub use instant::{CallFunc, CallFuncWith, Hide, Place, Show, ToggleVisibility};
pub use interval::{BoxedInterval, Delay, Interval, IntervalAction, IntervalClock, Lerp};
pub use modifier::{AccelDecel, Accelerate, Speed};
pub use motion::{Bezier, JumpBy, JumpTo, MoveBy, MoveTo};
pub use scheduler::{ActionId, Runner, Scheduler};
pub use target::{Attribute, Node, Target, Vec2};
pub use visual::{Blink, FadeIn, FadeOut, FadeTo, RotateBy, RotateTo, ScaleBy, ScaleTo};
