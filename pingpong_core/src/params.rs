/// Game tuning parameters for table tennis
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Flight
    pub const GRAVITY: f32 = 9.8;
    pub const GRAVITY_SCALE: f32 = 0.35; // Under-strength gravity keeps rallies long
    pub const AIR_RESISTANCE: f32 = 0.992; // Per-tick velocity multiplier
    pub const MAGNUS_EFFECT: f32 = 0.3;
    pub const SPIN_INFLUENCE: f32 = 0.4;
    pub const SPIN_DECAY: f32 = 0.96; // Per-tick spin multiplier
    pub const SCENE_SCALE: f32 = 20.0; // Velocity units -> scene units

    // Speed bounds
    pub const MAX_BALL_SPEED: f32 = 2.0;
    pub const MIN_BALL_SPEED: f32 = 0.3;

    // Table bounce
    pub const TABLE_RESTITUTION: f32 = 0.75;
    pub const TABLE_RESTITUTION_MIN: f32 = 0.6;
    pub const TABLE_RESTITUTION_MAX: f32 = 0.9;
    pub const BACKSPIN_BOOST: f32 = 0.1;
    pub const BACKSPIN_BOOST_MAX: f32 = 0.2;
    pub const TABLE_FRICTION: f32 = 0.8;
    pub const BOUNCE_SPIN_FORWARD: f32 = -0.6; // Partial reversal of spin.x
    pub const BOUNCE_SPIN_LATERAL: f32 = 0.8; // Retained share of spin.y

    // Net
    pub const NET_FORWARD_DAMPING: f32 = -0.4;
    pub const NET_VERTICAL_DAMPING: f32 = 0.5;
    pub const NET_LATERAL_JITTER: f32 = 0.1;
    pub const NET_SPIN_JITTER: f32 = 0.5;

    // Paddle
    pub const PADDLE_RESTITUTION: f32 = 1.25;
    pub const PADDLE_VELOCITY_TRANSFER: f32 = 0.4;
    pub const PADDLE_LATERAL_TRANSFER: f32 = 0.3;
    pub const PADDLE_VERTICAL_SPAN: f32 = 0.6;
    pub const HIT_LATERAL_GAIN: f32 = 0.6;
    pub const HIT_VERTICAL_GAIN: f32 = 0.4;
    pub const HIT_FORWARD_GAIN: f32 = 0.8;
    pub const HIT_LIFT: f32 = 0.2;
    pub const HIT_MIN_LIFT: f32 = 0.1;
    pub const HIT_SPIN_GAIN: f32 = 2.0;
    pub const OPPONENT_TOPSPIN: f32 = 1.2;
    pub const HIT_ANGULAR_SCALE: f32 = 6.0;
    pub const PLAYER_HIT_COOLDOWN: f32 = 0.1; // Seconds of simulation time

    // Serve
    pub const SERVE_POWER_BASE: f32 = 0.8;
    pub const SERVE_POWER_GAIN: f32 = 0.3;
    pub const SERVE_POWER_CAP: f32 = 0.2;
    pub const SERVE_ANGLE_GAIN: f32 = 0.1;
    pub const SERVE_HEIGHT_MIN: f32 = 0.4;
    pub const SERVE_HEIGHT_BAND: f32 = 0.2;
    pub const SERVE_SPIN: f32 = 1.5;
    pub const SERVE_ANGULAR_SCALE: f32 = 5.0;
    pub const SERVE_BALL_LIFT: f32 = 0.8; // Above table top on reset
    pub const SERVE_FOLLOW_LIFT: f32 = 0.4; // Above paddle while positioning
    pub const SERVE_BALL_OFFSET: f32 = 0.6; // In front of the server's paddle

    // Paddle reach above the table top
    pub const PLAYER_REACH_LOW: f32 = 0.3;
    pub const PLAYER_REACH_HIGH: f32 = 1.5;
    pub const OPPONENT_REACH_LOW: f32 = 0.4;
    pub const OPPONENT_REACH_HIGH: f32 = 1.2;

    // Out of bounds
    pub const OUT_SIDE_MARGIN: f32 = 0.1;
    pub const OUT_END_MARGIN: f32 = 3.0;
    pub const OUT_FLOOR_DEPTH: f32 = 2.0;

    // Score
    pub const WIN_SCORE: u32 = 11;
    pub const WIN_MARGIN: u32 = 2;

    // Frame
    pub const MAX_DT: f32 = 0.033; // Clamp to prevent tunnelling
}
