/// Error type for rejected table geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension is NaN, infinite, zero or negative.
    InvalidDimension { name: &'static str, value: f32 },
    /// The ball must be smaller than the paddle face.
    BallTooLarge { ball_radius: f32, paddle_radius: f32 },
    /// A paddle plane sits over the table instead of beyond its end.
    PaddleOverTable { side: &'static str, z: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDimension { name, value } => {
                write!(f, "invalid {}: {} (must be finite and positive)", name, value)
            }
            ConfigError::BallTooLarge {
                ball_radius,
                paddle_radius,
            } => write!(
                f,
                "ball radius {} must be smaller than paddle radius {}",
                ball_radius, paddle_radius
            ),
            ConfigError::PaddleOverTable { side, z } => {
                write!(f, "{} paddle plane z={} lies over the table", side, z)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
