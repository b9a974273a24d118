use crate::{Ball, Params};
use glam::Vec3;

/// Under-strength gravity followed by the per-tick air resistance multiplier.
///
/// Shared by the integrator and the opponent's trajectory predictor so both
/// see the same flight model.
pub fn apply_gravity_and_drag(vel: &mut Vec3, dt: f32) {
    vel.y -= Params::GRAVITY * dt * Params::GRAVITY_SCALE;
    *vel *= Params::AIR_RESISTANCE;
}

/// Advance the ball by one tick. The order of the steps matters.
///
/// The speed floor only applies while the ball is live; a ball at rest stays
/// at rest because it has no direction to scale.
pub fn apply_physics(ball: &mut Ball, dt: f32, in_play: bool) {
    apply_gravity_and_drag(&mut ball.vel, dt);

    // Magnus effect
    let magnus = ball.angular_velocity.cross(ball.vel) * (Params::MAGNUS_EFFECT * dt);
    ball.vel += magnus;

    // Cross-axis spin coupling
    ball.vel.x += ball.spin.y * Params::SPIN_INFLUENCE * dt;
    ball.vel.z += ball.spin.x * Params::SPIN_INFLUENCE * dt;

    ball.spin *= Params::SPIN_DECAY;
    ball.angular_velocity *= Params::SPIN_DECAY;

    let speed = ball.vel.length();
    if speed > Params::MAX_BALL_SPEED {
        ball.vel = ball.vel.normalize_or_zero() * Params::MAX_BALL_SPEED;
    } else if in_play && speed > 0.0 && speed < Params::MIN_BALL_SPEED {
        ball.vel = ball.vel.normalize_or_zero() * Params::MIN_BALL_SPEED;
    }

    ball.pos += ball.vel * dt * Params::SCENE_SCALE;
}
