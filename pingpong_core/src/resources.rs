use serde::{Deserialize, Serialize};

use crate::{Params, PointReason, Side};

/// Simulation clock. `now` only advances through the frame deltas fed to the
/// engine, so hit cooldowns never depend on wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub now: f32, // Total elapsed simulation time
}

impl Time {
    pub fn advance(&mut self, dt: f32) {
        self.now += dt;
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// First to 11, win by 2
    pub fn has_winner(&self) -> Option<Side> {
        let lead = self.player.abs_diff(self.opponent);
        if self.player.max(self.opponent) < Params::WIN_SCORE || lead < Params::WIN_MARGIN {
            None
        } else if self.player > self.opponent {
            Some(Side::Player)
        } else {
            Some(Side::Opponent)
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    /// Uniform sample in [0, 1)
    pub fn unit(&mut self) -> f32 {
        use rand::Rng;
        self.0.gen::<f32>()
    }

    /// Uniform sample in [-0.5, 0.5)
    pub fn centered(&mut self) -> f32 {
        self.unit() - 0.5
    }

    /// Either 1.0 or -1.0 with equal odds
    pub fn sign(&mut self) -> f32 {
        use rand::Rng;
        if self.0.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Per-paddle hit cooldown measured on the simulation clock
#[derive(Debug, Clone, Copy)]
pub struct HitCooldown {
    pub last_hit: Option<f32>,
    pub duration: f32,
}

impl HitCooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            last_hit: None,
            duration,
        }
    }

    pub fn ready(&self, now: f32) -> bool {
        match self.last_hit {
            Some(t) => now - t >= self.duration,
            None => true,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.last_hit = Some(now);
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // Display updates
    ScoreChanged { player: u32, opponent: u32 },
    RallyChanged(u32),
    ServePrompt { serve: u32 },
    ServePromptHidden,
    StartControlHidden,
    RallyCounterVisible(bool),
    MatchOver { winner: Side },

    // Gameplay cues
    ServeLaunched,
    TableBounce { side: Side },
    NetTouch,
    PaddleHit { side: Side },
    PointScored { winner: Side, reason: PointReason },
    Let,
}

/// Events raised during the current frame. `step` clears the queue at the
/// start of each frame; hosts read or drain it after `step` returns.
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub list: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.list.push(event);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.list)
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.list.contains(event)
    }
}
