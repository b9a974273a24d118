pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod opponent;
pub mod params;
pub mod resources;
pub mod state;
pub mod systems;

pub use components::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use input::*;
pub use opponent::*;
pub use params::*;
pub use resources::*;
pub use state::*;

use glam::Vec3;
use hecs::World;

/// Run one frame of the table tennis simulation
///
/// Order: clear last frame's events -> queued input -> opponent paddle -> ball physics and rules ->
/// player paddle velocity for the next frame.
pub fn step(
    world: &mut World,
    engine: &mut PhysicsEngine,
    opponent: &mut OpponentController,
    controls: &mut Controls,
    queue: &mut InputQueue,
    delta: f32,
) -> TickOutcome {
    // Clamp dt to prevent tunnelling through the table and net
    let dt = if delta.is_finite() {
        delta.clamp(0.0, Params::MAX_DT)
    } else {
        0.0
    };

    engine.events.clear();
    ingest_inputs(world, queue, controls, engine);
    opponent.update(world, dt, engine);
    let outcome = engine.update(world, dt);
    controls.update_paddle_velocity(world, dt);

    outcome
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, pos: Vec3) -> hecs::Entity {
    world.spawn((Paddle::new(side, pos),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: Vec3) -> hecs::Entity {
    world.spawn((Ball::new(pos),))
}

/// Build a world with the ball and both paddles at their starting spots
pub fn create_scene(config: &Config) -> World {
    let mut world = World::new();
    create_paddle(&mut world, Side::Player, config.paddle_home(Side::Player));
    create_paddle(&mut world, Side::Opponent, config.paddle_home(Side::Opponent));
    create_ball(
        &mut world,
        Vec3::new(0.0, config.table_top_y + Params::SERVE_BALL_LIFT, 0.0),
    );
    world
}

pub fn read_ball(world: &World) -> Option<Ball> {
    let mut query = world.query::<&Ball>();
    query.iter().next().map(|(_e, ball)| *ball)
}

pub fn write_ball(world: &mut World, ball: Ball) {
    if let Some((_e, slot)) = world.query_mut::<&mut Ball>().into_iter().next() {
        *slot = ball;
    }
}

pub fn read_paddle(world: &World, side: Side) -> Option<Paddle> {
    let mut query = world.query::<&Paddle>();
    query
        .iter()
        .map(|(_e, paddle)| *paddle)
        .find(|paddle| paddle.side == side)
}

pub fn write_paddle(world: &mut World, paddle: Paddle) {
    for (_e, slot) in world.query_mut::<&mut Paddle>() {
        if slot.side == paddle.side {
            *slot = paddle;
            return;
        }
    }
}
