//! Opponent controller: predicts where the ball is heading and eases the
//! opponent paddle toward it.

use glam::Vec3;
use hecs::World;

use crate::systems::apply_gravity_and_drag;
use crate::{read_ball, read_paddle, write_paddle, Config, GameRng, Params, PhysicsEngine, Side};

/// Opponent difficulty parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentSkill {
    /// Seconds to react to a new ball.
    pub reaction_time: f32,
    /// 1.0 aims perfectly, lower values add aim error.
    pub accuracy: f32,
    pub move_speed: f32,
    /// How far ahead the ball is simulated (seconds).
    pub prediction_time: f32,
    pub prediction_steps: u32,
    pub skill_level: f32,
}

impl OpponentSkill {
    pub fn easy() -> Self {
        Self {
            reaction_time: 0.35,
            accuracy: 0.6,
            move_speed: 5.0,
            skill_level: 0.7,
            ..Self::normal()
        }
    }

    pub fn normal() -> Self {
        Self {
            reaction_time: 0.2,
            accuracy: 0.85,
            move_speed: 8.0,
            prediction_time: 0.6,
            prediction_steps: 15,
            skill_level: 0.9,
        }
    }

    pub fn hard() -> Self {
        Self {
            reaction_time: 0.12,
            accuracy: 0.95,
            move_speed: 10.0,
            skill_level: 1.0,
            ..Self::normal()
        }
    }
}

impl Default for OpponentSkill {
    fn default() -> Self {
        Self::normal()
    }
}

pub struct OpponentController {
    pub skill: OpponentSkill,
    pub target: Vec3,
    rng: GameRng,
}

impl OpponentController {
    pub fn new(skill: OpponentSkill, rng: GameRng) -> Self {
        Self {
            skill,
            target: Vec3::ZERO,
            rng,
        }
    }

    /// Track the ball while it is live and heading our way after a player hit.
    pub fn update(&mut self, world: &mut World, delta: f32, engine: &PhysicsEngine) {
        if !engine.state.ball_in_play || engine.state.last_hit_by != Some(Side::Player) {
            return;
        }
        let (Some(ball), Some(mut paddle)) = (read_ball(world), read_paddle(world, Side::Opponent))
        else {
            return;
        };
        let config = engine.config();

        let mut predicted = self.predict(ball.pos, ball.vel, config);

        // Aim error so the opponent is beatable
        let error = (1.0 - self.skill.accuracy) * 0.3;
        predicted.x += self.rng.centered() * error * config.table_width;
        predicted.y += self.rng.centered() * error * 0.5;

        self.target = config.clamp_paddle(Side::Opponent, predicted);

        paddle.pos = paddle.pos.lerp(self.target, self.smoothing(delta));
        write_paddle(world, paddle);
    }

    /// Forward-simulate the ball over the prediction horizon using the same
    /// flight model as the engine, with a simplified table bounce.
    pub fn predict(&self, pos: Vec3, vel: Vec3, config: &Config) -> Vec3 {
        let steps = self.skill.prediction_steps.max(1);
        let step = self.skill.prediction_time / steps as f32;

        let mut pos = pos;
        let mut vel = vel;
        for _ in 0..steps {
            apply_gravity_and_drag(&mut vel, step);
            pos += vel * step * Params::SCENE_SCALE;

            if pos.y <= config.ball_rest_y() && vel.y < 0.0 && config.over_table(pos) {
                vel.y *= -Params::TABLE_RESTITUTION;
            }
        }
        pos
    }

    /// Fraction of the remaining distance covered this frame.
    pub fn smoothing(&self, delta: f32) -> f32 {
        let reaction = if self.skill.reaction_time > 0.0 {
            (delta / self.skill.reaction_time).min(1.0)
        } else {
            1.0
        };
        (reaction * self.skill.move_speed * self.skill.skill_level * 0.1).clamp(0.0, 1.0)
    }
}
