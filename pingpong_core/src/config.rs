use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Params, Side};

/// Fixed table geometry, supplied once when the engine is built.
///
/// The long axis of the table is z: the player stands at positive z, the
/// opponent at negative z, and the net sits on the z = 0 plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_width: f32,
    pub table_length: f32,
    pub table_top_y: f32,
    pub net_height: f32,
    pub net_overhang: f32,
    pub ball_radius: f32,
    pub paddle_radius: f32,
    pub player_paddle_z: f32,
    pub opponent_paddle_z: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: 5.0,
            table_length: 9.0,
            table_top_y: 2.5,
            net_height: 0.5,
            net_overhang: 0.5,
            ball_radius: 0.066,
            paddle_radius: 0.45,
            player_paddle_z: 5.5,
            opponent_paddle_z: -5.5,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject geometry the simulation cannot run on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("table_width", self.table_width),
            ("table_length", self.table_length),
            ("table_top_y", self.table_top_y),
            ("net_height", self.net_height),
            ("ball_radius", self.ball_radius),
            ("paddle_radius", self.paddle_radius),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        if !self.net_overhang.is_finite() || self.net_overhang < 0.0 {
            return Err(ConfigError::InvalidDimension {
                name: "net_overhang",
                value: self.net_overhang,
            });
        }
        if self.ball_radius >= self.paddle_radius {
            return Err(ConfigError::BallTooLarge {
                ball_radius: self.ball_radius,
                paddle_radius: self.paddle_radius,
            });
        }
        if !self.player_paddle_z.is_finite() || self.player_paddle_z <= self.half_length() {
            return Err(ConfigError::PaddleOverTable {
                side: "player",
                z: self.player_paddle_z,
            });
        }
        if !self.opponent_paddle_z.is_finite() || self.opponent_paddle_z >= -self.half_length() {
            return Err(ConfigError::PaddleOverTable {
                side: "opponent",
                z: self.opponent_paddle_z,
            });
        }
        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.table_width / 2.0
    }

    pub fn half_length(&self) -> f32 {
        self.table_length / 2.0
    }

    /// Height of the ball centre when resting on the table.
    pub fn ball_rest_y(&self) -> f32 {
        self.table_top_y + self.ball_radius
    }

    /// Whether a horizontal position lies over the table footprint.
    pub fn over_table(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.half_width() && pos.z.abs() <= self.half_length()
    }

    /// Which half of the table a position belongs to.
    pub fn side_of(&self, pos: Vec3) -> Side {
        if pos.z > 0.0 {
            Side::Player
        } else {
            Side::Opponent
        }
    }

    /// Z plane a paddle moves on.
    pub fn paddle_z(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.player_paddle_z,
            Side::Opponent => self.opponent_paddle_z,
        }
    }

    /// Where a paddle starts a match.
    pub fn paddle_home(&self, side: Side) -> Vec3 {
        Vec3::new(0.0, self.table_top_y + 0.35, self.paddle_z(side))
    }

    /// Clamp a paddle target into the reachable window for that side.
    pub fn clamp_paddle(&self, side: Side, target: Vec3) -> Vec3 {
        let max_x = (self.half_width() - self.paddle_radius).max(0.0);
        let (low, high) = match side {
            Side::Player => (Params::PLAYER_REACH_LOW, Params::PLAYER_REACH_HIGH),
            Side::Opponent => (Params::OPPONENT_REACH_LOW, Params::OPPONENT_REACH_HIGH),
        };
        Vec3::new(
            target.x.clamp(-max_x, max_x),
            target.y.clamp(self.table_top_y + low, self.table_top_y + high),
            self.paddle_z(side),
        )
    }
}
