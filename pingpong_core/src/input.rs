//! Control adapter between raw input and the engine.
//!
//! Pointer capture and screen-to-world projection happen in the host; this
//! module only sees the resulting point on the player's paddle plane.

use glam::Vec3;
use hecs::World;

use crate::{read_paddle, write_paddle, Config, PhysicsEngine, Side};

/// Input captured since the last frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved; world-space point already projected on the paddle plane.
    PointerMoved(Vec3),
    /// Click or tap. Serves while positioning, otherwise ignored.
    Press,
    /// Start button.
    Start,
}

/// Input queue filled by the host between frames
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }
}

/// Player paddle driver. Publishes the paddle position and the velocity
/// derived from frame-to-frame movement.
#[derive(Debug, Clone)]
pub struct Controls {
    last_position: Vec3,
    velocity: Vec3,
}

impl Controls {
    pub fn new(config: &Config) -> Self {
        Self {
            last_position: config.paddle_home(Side::Player),
            velocity: Vec3::ZERO,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Move the player paddle to a pointer point, clamped to its reach.
    pub fn move_paddle(&mut self, world: &mut World, config: &Config, target: Vec3) {
        let Some(mut paddle) = read_paddle(world, Side::Player) else {
            return;
        };
        paddle.pos = config.clamp_paddle(Side::Player, target);
        write_paddle(world, paddle);
    }

    /// Recompute paddle velocity from the movement since the previous frame.
    pub fn update_paddle_velocity(&mut self, world: &mut World, delta: f32) {
        let Some(mut paddle) = read_paddle(world, Side::Player) else {
            return;
        };
        if delta > 0.0 {
            self.velocity = (paddle.pos - self.last_position) / delta;
        }
        self.last_position = paddle.pos;

        paddle.vel = self.velocity;
        write_paddle(world, paddle);
    }
}

/// Apply queued input to the paddle and engine.
pub fn ingest_inputs(
    world: &mut World,
    queue: &mut InputQueue,
    controls: &mut Controls,
    engine: &mut PhysicsEngine,
) {
    for input in queue.inputs.drain(..) {
        match input {
            InputEvent::PointerMoved(point) => {
                if engine.state.is_playing {
                    controls.move_paddle(world, engine.config(), point);
                }
            }
            InputEvent::Press => {
                if engine.state.is_serving {
                    engine.execute_serve(world, controls.velocity());
                }
            }
            InputEvent::Start => {
                if !engine.state.is_playing {
                    engine.start_game(world);
                }
            }
        }
    }
}
