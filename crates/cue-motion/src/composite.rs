//! Combinators that compose action trees out of other actions.
//!
//! [`Sequence`] runs children back to back, [`Spawn`] runs them
//! simultaneously, [`Loop`] restarts one child a fixed number of times, and
//! [`Repeat`] restarts it forever. Combinators hold boxed children and are
//! themselves actions, so trees nest to arbitrary depth.
//!
//! A combinator that has completed ignores further `step` calls: its
//! children have already been stopped, so there is nothing left to forward
//! a tick to. Stepping after an external `stop` is still lifecycle misuse
//! and trips the stopped children's asserts.

use tracing::trace;

use crate::action::{Action, BoxedAction};
use crate::error::Result;
use crate::target::Target;

/// Run children strictly one after another.
///
/// Exactly one child is active at a time. When the active child finishes
/// during a tick it is stopped and the next child is started in that same
/// tick, but the next child receives no `dt` until the following tick.
pub struct Sequence {
    children: Vec<BoxedAction>,
    current: usize,
    done: bool,
}

impl Sequence {
    /// Build from two or more children. Use [`crate::action::sequence`] for
    /// the collapsing, validating constructor.
    pub fn new(children: Vec<BoxedAction>) -> Self {
        assert!(!children.is_empty(), "Sequence requires at least one child");
        Self {
            children,
            current: 0,
            done: false,
        }
    }
}

impl Action for Sequence {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        self.current = 0;
        self.done = false;
        self.children[0].start(target)
    }

    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        if self.done {
            // All children stopped; ticks past completion are ignored.
            return Ok(());
        }
        let child = &mut self.children[self.current];
        child.step(target, dt)?;
        if child.done() {
            child.stop(target);
            self.current += 1;
            if self.current < self.children.len() {
                trace!(child = self.current, "sequence advancing");
                self.children[self.current].start(target)?;
            } else {
                self.done = true;
            }
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, target: &mut dyn Target) {
        if !self.done {
            self.children[self.current].stop(target);
        }
    }

    fn name(&self) -> &'static str {
        "Sequence"
    }
}

/// Run all children simultaneously against the same target.
///
/// Finished children freeze at their final state while the rest keep
/// stepping; the spawn completes once every child reports done after the
/// tick's updates.
pub struct Spawn {
    children: Vec<BoxedAction>,
    done: bool,
}

impl Spawn {
    /// Build from one or more children. Use [`crate::action::parallel`] for
    /// the validating constructor.
    pub fn new(children: Vec<BoxedAction>) -> Self {
        assert!(!children.is_empty(), "Spawn requires at least one child");
        Self {
            children,
            done: false,
        }
    }
}

impl Action for Spawn {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        self.done = false;
        for child in &mut self.children {
            child.start(target)?;
        }
        Ok(())
    }

    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        if self.done {
            return Ok(());
        }
        for child in &mut self.children {
            if !child.done() {
                child.step(target, dt)?;
            }
        }
        // Completion is evaluated after the tick's updates, so a child
        // finishing this tick counts toward it.
        self.done = self.children.iter().all(|child| child.done());
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, target: &mut dyn Target) {
        for child in &mut self.children {
            child.stop(target);
        }
    }

    fn name(&self) -> &'static str {
        "Spawn"
    }
}

/// Restart one child a fixed number of times.
///
/// The same child object is restarted for every cycle; state-capturing
/// children re-snapshot the target at each restart, compounding relative
/// motions.
pub struct Loop {
    child: BoxedAction,
    times: u32,
    remaining: u32,
    done: bool,
}

impl Loop {
    /// Build a loop of `times >= 1` cycles. Use [`crate::action::repeat`]
    /// for the validating constructor.
    pub fn new(child: BoxedAction, times: u32) -> Self {
        assert!(times >= 1, "Loop requires at least one cycle");
        Self {
            child,
            times,
            remaining: times,
            done: false,
        }
    }
}

impl Action for Loop {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        self.remaining = self.times;
        self.done = false;
        self.child.start(target)
    }

    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        if self.done {
            return Ok(());
        }
        self.child.step(target, dt)?;
        if self.child.done() {
            self.child.stop(target);
            self.remaining -= 1;
            if self.remaining == 0 {
                self.done = true;
            } else {
                trace!(remaining = self.remaining, "loop restarting child");
                self.child.start(target)?;
            }
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }

    fn stop(&mut self, target: &mut dyn Target) {
        if !self.done {
            self.child.stop(target);
        }
    }

    fn name(&self) -> &'static str {
        "Loop"
    }
}

/// Restart one child forever. Never completes; only an external `stop`
/// (driver cancellation) ends it.
pub struct Repeat {
    child: BoxedAction,
}

impl Repeat {
    pub fn new(child: BoxedAction) -> Self {
        Self { child }
    }
}

impl Action for Repeat {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        self.child.start(target)
    }

    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        self.child.step(target, dt)?;
        if self.child.done() {
            self.child.stop(target);
            self.child.start(target)?;
        }
        Ok(())
    }

    fn done(&self) -> bool {
        false
    }

    fn stop(&mut self, target: &mut dyn Target) {
        self.child.stop(target);
    }

    fn name(&self) -> &'static str {
        "Repeat"
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{parallel, repeat, repeat_forever, sequence};
    use crate::instant::Place;
    use crate::interval::{Delay, IntervalAction};
    use crate::motion::MoveBy;
    use crate::target::Node;
    use crate::visual::FadeOut;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_sequence_runs_children_in_order() {
        let mut node = Node::at(0.0, 0.0);
        let mut action = sequence(vec![
            MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(),
            MoveBy::new((0.0, 5.0), 1.0).unwrap().into_action(),
        ])
        .unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        // First child finished and the second started, but the second gets
        // no dt this tick.
        assert!(approx(node.x, 10.0));
        assert!(approx(node.y, 0.0));
        assert!(!action.done());

        action.step(&mut node, 1.0).unwrap();
        assert!(approx(node.y, 5.0));
        assert!(action.done());
    }

    #[test]
    fn test_sequence_with_instant_child() {
        let mut node = Node::at(0.0, 0.0);
        let mut action = sequence(vec![
            Box::new(Place::new((100.0, 100.0))),
            MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(),
        ])
        .unwrap();

        // The instant completes inside start; the move begins from the
        // placed position on the next tick.
        action.start(&mut node).unwrap();
        assert!(approx(node.x, 100.0));

        action.step(&mut node, 0.0).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(approx(node.x, 110.0));
        assert!(action.done());
    }

    #[test]
    fn test_sequence_stop_reaches_active_child() {
        let mut node = Node::default();
        let mut action = sequence(vec![
            Delay::new(1.0).unwrap().into_action(),
            Delay::new(1.0).unwrap().into_action(),
        ])
        .unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 0.5).unwrap();
        action.stop(&mut node);
        assert!(!action.done());
    }

    #[test]
    fn test_spawn_completes_with_longest_child() {
        let mut node = Node::at(0.0, 0.0);
        let mut action = parallel(vec![
            MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(),
            FadeOut::new(2.0).unwrap().into_action(),
        ])
        .unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(approx(node.x, 10.0));
        assert_eq!(node.opacity, 128);
        assert!(!action.done());

        // The finished move is frozen; only the fade keeps updating.
        action.step(&mut node, 1.0).unwrap();
        assert!(approx(node.x, 10.0));
        assert_eq!(node.opacity, 0);
        assert!(action.done());
    }

    #[test]
    fn test_spawn_of_equal_durations_finishes_in_one_pass() {
        let mut node = Node::default();
        let mut action = parallel(vec![
            Delay::new(1.0).unwrap().into_action(),
            Delay::new(1.0).unwrap().into_action(),
        ])
        .unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(action.done());
    }

    #[test]
    fn test_loop_restarts_same_child() {
        let mut node = Node::at(0.0, 0.0);
        // Relative motion compounds across cycles.
        let mut action = repeat(MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(), 3).unwrap();

        action.start(&mut node).unwrap();
        for _ in 0..3 {
            assert!(!action.done());
            action.step(&mut node, 1.0).unwrap();
        }
        assert!(approx(node.x, 30.0));
        assert!(action.done());
    }

    #[test]
    fn test_loop_of_delay_completes_after_exact_ticks() {
        let mut node = Node::default();
        let mut action = repeat(Delay::new(1.0).unwrap().into_action(), 3).unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(!action.done());
        action.step(&mut node, 1.0).unwrap();
        assert!(!action.done());
        action.step(&mut node, 1.0).unwrap();
        assert!(action.done());
    }

    #[test]
    fn test_loop_restart_resets_cycle_count() {
        let mut node = Node::default();
        let mut action = repeat(Delay::new(1.0).unwrap().into_action(), 2).unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(action.done());
        action.stop(&mut node);

        action.start(&mut node).unwrap();
        assert!(!action.done());
        action.step(&mut node, 1.0).unwrap();
        assert!(!action.done());
    }

    #[test]
    fn test_repeat_never_completes() {
        let mut node = Node::at(0.0, 0.0);
        let mut action = repeat_forever(MoveBy::new((1.0, 0.0), 1.0).unwrap().into_action());

        action.start(&mut node).unwrap();
        for _ in 0..10 {
            action.step(&mut node, 1.0).unwrap();
            assert!(!action.done());
        }
        assert!(approx(node.x, 10.0));

        // Only an external stop ends it.
        action.stop(&mut node);
        assert!(!action.done());
    }

    #[test]
    fn test_step_after_completion_is_ignored() {
        let mut node = Node::at(0.0, 0.0);
        let mut action = sequence(vec![
            MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(),
            MoveBy::new((10.0, 0.0), 1.0).unwrap().into_action(),
        ])
        .unwrap();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(action.done());

        // Children are already stopped; extra ticks change nothing.
        action.step(&mut node, 5.0).unwrap();
        assert!(approx(node.x, 20.0));
        assert!(action.done());

        let mut looped = repeat(Delay::new(1.0).unwrap().into_action(), 2).unwrap();
        looped.start(&mut node).unwrap();
        looped.step(&mut node, 1.0).unwrap();
        looped.step(&mut node, 1.0).unwrap();
        assert!(looped.done());
        looped.step(&mut node, 1.0).unwrap();
        assert!(looped.done());
    }

    #[test]
    fn test_nested_composites() {
        let mut node = Node::at(0.0, 0.0);
        let inner = sequence(vec![
            MoveBy::new((5.0, 0.0), 1.0).unwrap().into_action(),
            MoveBy::new((0.0, 5.0), 1.0).unwrap().into_action(),
        ])
        .unwrap();
        let mut action = repeat(inner, 2).unwrap();

        action.start(&mut node).unwrap();
        for _ in 0..4 {
            action.step(&mut node, 1.0).unwrap();
        }
        assert!(approx(node.x, 10.0));
        assert!(approx(node.y, 10.0));
        assert!(action.done());
    }
}
