//! Fixed-rate driver demo: composes an action tree and ticks it at 60 Hz,
//! logging the target's state as the tree plays out.

use anyhow::Result;
use cue_motion::{
    AccelDecel, ActionExt, Blink, FadeOut, IntervalAction, MoveBy, Node, RotateTo, Scheduler,
    repeat, sequence,
};

const TICK: f64 = 1.0 / 60.0;

fn build_routine() -> Result<cue_motion::BoxedAction> {
    // Glide right with ease-in/ease-out while turning to face the motion,
    // blink twice, then retreat and fade away.
    let glide = AccelDecel::new(MoveBy::new((240.0, 0.0), 2.0)?)
        .into_action()
        .alongside(RotateTo::new(90.0, 2.0)?.into_action());

    let routine = sequence(vec![
        glide,
        repeat(Blink::new(1, 0.4)?.into_action(), 2)?,
        MoveBy::new((-240.0, 0.0), 1.0)?
            .into_action()
            .alongside(FadeOut::new(1.0)?.into_action()),
    ])?;
    Ok(routine)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut node = Node::at(0.0, 120.0);
    let mut scheduler = Scheduler::new();
    let id = scheduler.run(build_routine()?, &mut node)?;
    log::info!("started routine {:?}", id);

    let mut tick = 0u64;
    while !scheduler.is_idle() {
        scheduler.update(&mut node, TICK)?;
        tick += 1;
        if tick % 30 == 0 {
            log::info!(
                "t={:5.2}s pos=({:7.2}, {:6.2}) rot={:6.2} opacity={:3} visible={}",
                tick as f64 * TICK,
                node.x,
                node.y,
                node.rotation,
                node.opacity,
                node.visible,
            );
        }
    }

    log::info!(
        "routine finished after {tick} ticks at ({:.2}, {:.2})",
        node.x,
        node.y
    );
    Ok(())
}
