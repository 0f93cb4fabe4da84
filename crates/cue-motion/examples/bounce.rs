//! A ball bounce: jump arcs across the screen, then fade out and reset.
//!
//! Run with `cargo run --example bounce`.

use cue_motion::{
    ActionExt, FadeIn, FadeOut, IntervalAction, JumpBy, Node, Place, Result, Scheduler,
};

fn main() -> Result<()> {
    let mut ball = Node::at(0.0, 0.0);

    let bounce = JumpBy::new((300.0, 0.0), 40.0, 4, 2.0)?
        .into_action()
        .alongside(FadeIn::new(0.5)?.into_action())
        .then(FadeOut::new(0.5)?.into_action())
        .then(Box::new(Place::new((0.0, 0.0))));

    let mut scheduler = Scheduler::new();
    scheduler.run(bounce, &mut ball)?;

    let dt = 1.0 / 30.0;
    let mut frame = 0u32;
    while !scheduler.is_idle() {
        scheduler.update(&mut ball, dt)?;
        frame += 1;
        if frame % 5 == 0 {
            println!(
                "frame {frame:3}  pos=({:7.2}, {:6.2})  opacity={:3}",
                ball.x, ball.y, ball.opacity
            );
        }
    }
    println!("done after {frame} frames, back at ({}, {})", ball.x, ball.y);
    Ok(())
}
