use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,   // Positive z, serves every point
    Opponent, // Negative z, AI controlled
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Sign of the z velocity a return from this side carries.
    pub fn return_direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Ball component - position, velocity and spin of the ball
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,              // Units per second (before scene scaling)
    pub spin: Vec3,             // Spin proxy, drives cross-axis coupling
    pub angular_velocity: Vec3, // Scaled copy of spin, drives the Magnus term
}

impl Ball {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Stop all motion and spin, keeping position.
    pub fn stop(&mut self) {
        self.vel = Vec3::ZERO;
        self.spin = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Replace spin and derive the angular velocity from it.
    pub fn set_spin(&mut self, spin: Vec3, angular_scale: f32) {
        self.spin = spin;
        self.angular_velocity = spin * angular_scale;
    }
}

/// Paddle component - a player's paddle as published by its controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec3,
    pub vel: Vec3, // Only meaningful for the player paddle
}

impl Paddle {
    pub fn new(side: Side, pos: Vec3) -> Self {
        Self {
            side,
            pos,
            vel: Vec3::ZERO,
        }
    }
}
