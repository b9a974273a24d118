use crate::{Ball, Config, GameRng, Paddle, Params, Side};
use glam::Vec3;

/// Bounce the ball off the table top if it is descending through it over the
/// table footprint. Returns the half of the table that was hit.
pub fn bounce_off_table(ball: &mut Ball, config: &Config) -> Option<Side> {
    let rest_y = config.ball_rest_y();
    if ball.pos.y > rest_y || ball.vel.y >= 0.0 || !config.over_table(ball.pos) {
        return None;
    }

    let side = config.side_of(ball.pos);
    ball.pos.y = rest_y;

    // Split into normal/tangential parts against the table normal
    let normal = Vec3::Y;
    let vn = ball.vel.dot(normal);
    let vt = ball.vel - normal * vn;

    // Backspin (negative spin.x) makes the bounce livelier
    let restitution = (Params::TABLE_RESTITUTION
        + (-ball.spin.x * Params::BACKSPIN_BOOST).min(Params::BACKSPIN_BOOST_MAX))
    .clamp(Params::TABLE_RESTITUTION_MIN, Params::TABLE_RESTITUTION_MAX);

    ball.vel = vt * Params::TABLE_FRICTION + normal * (-vn * restitution);

    ball.spin.x *= Params::BOUNCE_SPIN_FORWARD;
    ball.spin.y *= Params::BOUNCE_SPIN_LATERAL;

    Some(side)
}

/// Whether the ball overlaps the net volume.
pub fn touches_net(ball: &Ball, config: &Config) -> bool {
    let r = config.ball_radius;
    let net_bottom = config.table_top_y;
    let net_top = config.table_top_y + config.net_height;
    let half_span = (config.table_width + 2.0 * config.net_overhang) / 2.0;

    ball.pos.z.abs() < r
        && ball.pos.y > net_bottom - r
        && ball.pos.y < net_top + r
        && ball.pos.x.abs() < half_span
}

/// Knock the ball back off the net with a little random deflection.
pub fn clip_net(ball: &mut Ball, rng: &mut GameRng) {
    ball.vel.z *= Params::NET_FORWARD_DAMPING;
    ball.vel.y *= Params::NET_VERTICAL_DAMPING;
    ball.vel.x += rng.centered() * Params::NET_LATERAL_JITTER;
    ball.spin.y += rng.centered() * Params::NET_SPIN_JITTER;
}

/// Whether the ball overlaps the paddle face.
pub fn touches_paddle(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    ball.pos.distance(paddle.pos) <= config.paddle_radius + config.ball_radius
}

/// Whether the ball is travelling toward a paddle's end of the table.
pub fn approaching(ball: &Ball, side: Side) -> bool {
    match side {
        Side::Player => ball.vel.z > 0.0,
        Side::Opponent => ball.vel.z < 0.0,
    }
}

/// Send the ball back from a paddle contact.
///
/// Outgoing direction comes from where the ball sits on the paddle face;
/// `paddle_vel` adds power and lateral drag. Only the player paddle passes a
/// non-zero velocity.
pub fn strike(
    ball: &mut Ball,
    paddle: &Paddle,
    paddle_vel: Vec3,
    config: &Config,
    rng: &mut GameRng,
) {
    let rel = ball.pos - paddle.pos;

    let power = (ball.speed() * Params::PADDLE_RESTITUTION
        + paddle_vel.length() * Params::PADDLE_VELOCITY_TRANSFER)
        .min(Params::MAX_BALL_SPEED);

    let angle_x = (rel.x / config.paddle_radius).clamp(-1.0, 1.0);
    let angle_y = (rel.y / Params::PADDLE_VERTICAL_SPAN)
        .clamp(-Params::PADDLE_VERTICAL_SPAN, Params::PADDLE_VERTICAL_SPAN);

    ball.vel = Vec3::new(
        angle_x * power * Params::HIT_LATERAL_GAIN + paddle_vel.x * Params::PADDLE_LATERAL_TRANSFER,
        (angle_y * power * Params::HIT_VERTICAL_GAIN + Params::HIT_LIFT).max(Params::HIT_MIN_LIFT),
        paddle.side.return_direction() * power * Params::HIT_FORWARD_GAIN,
    );

    let spin = match paddle.side {
        Side::Player => Vec3::new(
            -rel.y * Params::HIT_SPIN_GAIN,
            rel.x * Params::HIT_SPIN_GAIN,
            paddle_vel.length() * rng.sign(),
        ),
        // Placement-independent spin to keep the player guessing
        Side::Opponent => Vec3::new(rng.sign() * Params::OPPONENT_TOPSPIN, rng.centered(), 0.0),
    };
    ball.set_spin(spin, Params::HIT_ANGULAR_SCALE);
}
