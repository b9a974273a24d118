//! Physics and rules engine.
//!
//! Owns the ball's flight state, the serve/rally state machine and the score.
//! Ball and paddle transforms live in the shared `hecs::World`; the engine is
//! the only writer of the ball entity and only reads the paddles.

use glam::Vec3;
use hecs::World;
use log::{debug, info, trace};

use crate::systems::{
    apply_physics, approaching, bounce_off_table, clip_net, strike, touches_net, touches_paddle,
};
use crate::{
    read_ball, read_paddle, write_ball, Ball, Config, ConfigError, Events, GameEvent, GameRng,
    GameState, HitCooldown, Paddle, Params, PointReason, Score, ServeStage, Side, TickOutcome,
    Time,
};

/// The player serves every point.
pub const SERVER: Side = Side::Player;

pub struct PhysicsEngine {
    config: Config,
    pub state: GameState,
    pub score: Score,
    pub time: Time,
    pub events: Events,
    rng: GameRng,
    player_cooldown: HitCooldown,
    tick_outcome: TickOutcome,
}

impl PhysicsEngine {
    pub fn new(config: Config, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::new(),
            score: Score::new(),
            time: Time::default(),
            events: Events::new(),
            rng,
            player_cooldown: HitCooldown::new(Params::PLAYER_HIT_COOLDOWN),
            tick_outcome: TickOutcome::Continue,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset scores and counters and wait for the first serve.
    pub fn start_game(&mut self, world: &mut World) {
        self.state = GameState {
            is_playing: true,
            ..GameState::new()
        };
        self.score = Score::new();
        self.player_cooldown = HitCooldown::new(Params::PLAYER_HIT_COOLDOWN);

        self.events.push(GameEvent::ScoreChanged {
            player: 0,
            opponent: 0,
        });
        self.events.push(GameEvent::StartControlHidden);
        self.events.push(GameEvent::RallyCounterVisible(true));
        info!("Match started");

        self.reset_ball_for_serve(world);
    }

    /// Put the ball back in front of the server's paddle for a fresh serve.
    pub fn reset_ball_for_serve(&mut self, world: &mut World) {
        let (Some(mut ball), Some(server)) = (read_ball(world), read_paddle(world, SERVER)) else {
            return; // Scene not built yet
        };
        self.prepare_serve(&mut ball, &server);
        write_ball(world, ball);
    }

    /// Launch the ball from the server's paddle. Ignored unless positioning.
    pub fn execute_serve(&mut self, world: &mut World, paddle_velocity: Vec3) {
        if !self.state.is_playing || !self.state.is_serving {
            return;
        }
        let (Some(mut ball), Some(server)) = (read_ball(world), read_paddle(world, SERVER)) else {
            return;
        };

        // Capped so a flick of the mouse cannot blow up the serve
        let power = Params::SERVE_POWER_BASE
            + (paddle_velocity.length() * Params::SERVE_POWER_GAIN).min(Params::SERVE_POWER_CAP);
        let angle_x = server.pos.x * Params::SERVE_ANGLE_GAIN;
        let height = Params::SERVE_HEIGHT_MIN + self.rng.unit() * Params::SERVE_HEIGHT_BAND;

        ball.vel = Vec3::new(angle_x, height, SERVER.return_direction() * power);
        let side_spin = self.rng.sign() * Params::SERVE_SPIN;
        ball.set_spin(Vec3::new(side_spin, 0.0, 0.0), Params::SERVE_ANGULAR_SCALE);
        write_ball(world, ball);

        self.state.is_serving = false;
        self.state.ball_in_play = true;
        self.state.last_hit_by = Some(SERVER);

        self.events.push(GameEvent::ServePromptHidden);
        self.events.push(GameEvent::ServeLaunched);
        debug!(
            "Serve {} launched: vel={:?} spin={:?}",
            self.state.serve_count, ball.vel, ball.spin
        );
    }

    /// Advance one frame. `delta` must already be capped by the caller.
    ///
    /// At most one point or let is decided per call; once one fires the
    /// remaining collision and rule checks for the tick are skipped.
    pub fn update(&mut self, world: &mut World, delta: f32) -> TickOutcome {
        self.tick_outcome = TickOutcome::Continue;
        if !self.state.is_playing {
            return self.tick_outcome;
        }
        self.time.advance(delta);

        let (Some(mut ball), Some(player), Some(opponent)) = (
            read_ball(world),
            read_paddle(world, Side::Player),
            read_paddle(world, Side::Opponent),
        ) else {
            return self.tick_outcome;
        };

        if self.state.ball_in_play {
            self.simulate(&mut ball, &player, &opponent, delta);
        } else if self.state.is_serving {
            // Ball rides along with the paddle until the serve is executed
            ball.pos = serve_follow_position(&player);
        }

        write_ball(world, ball);
        self.tick_outcome
    }

    fn simulate(&mut self, ball: &mut Ball, player: &Paddle, opponent: &Paddle, delta: f32) {
        self.apply_physics(ball, delta);

        // Net contact takes precedence over the table this tick
        let hit_net = self.check_net_collision(ball);
        if !hit_net {
            self.check_table_collision(ball, player);
        }
        if self.tick_outcome.is_terminal() {
            return;
        }

        self.check_paddle_collision(ball, player);
        if self.tick_outcome.is_terminal() {
            return;
        }
        self.check_paddle_collision(ball, opponent);
        if self.tick_outcome.is_terminal() {
            return;
        }

        self.check_rules(ball, player);
    }

    pub fn apply_physics(&self, ball: &mut Ball, delta: f32) {
        apply_physics(ball, delta, self.state.ball_in_play);
    }

    /// Bounce off the table and advance the serve stage. Returns whether the
    /// ball touched the table.
    pub fn check_table_collision(&mut self, ball: &mut Ball, server: &Paddle) -> bool {
        let Some(side) = bounce_off_table(ball, &self.config) else {
            return false;
        };

        self.state.last_bounce_side = Some(side);
        self.state.ball_touched_table = true;
        if self.state.last_hit_by.map(Side::opposite) == Some(side) {
            self.state.receiver_bounces += 1;
        }
        self.events.push(GameEvent::TableBounce { side });
        trace!("Table bounce on {:?} half at {:?}", side, ball.pos);

        match self.state.serve_stage {
            ServeStage::NeedServerBounce => {
                if side == SERVER {
                    self.state.serve_stage = ServeStage::NeedReceiverBounce;
                } else {
                    debug!("Serve fault: first bounce on the receiver's half");
                    self.score_point(ball, server, SERVER.opposite(), PointReason::ServeFault);
                }
            }
            ServeStage::NeedReceiverBounce => {
                if side == SERVER.opposite() {
                    self.state.serve_stage = ServeStage::None;
                } else {
                    debug!("Serve fault: second bounce on the server's half");
                    self.score_point(ball, server, SERVER.opposite(), PointReason::ServeFault);
                }
            }
            ServeStage::None => {}
        }

        true
    }

    /// Deflect the ball off the net. Flags a let if the serve clipped it.
    ///
    /// Only the first tick of an overlap counts as a contact; the ball gets
    /// one deflection per pass through the net.
    pub fn check_net_collision(&mut self, ball: &mut Ball) -> bool {
        if !touches_net(ball, &self.config) {
            self.state.net_contact = false;
            return false;
        }
        if self.state.net_contact {
            return false;
        }
        self.state.net_contact = true;

        clip_net(ball, &mut self.rng);
        if self.state.in_serve_sequence() {
            self.state.serve_net_touch = true;
        }
        self.events.push(GameEvent::NetTouch);
        trace!("Net touch at {:?}", ball.pos);
        true
    }

    /// Return the ball off a paddle if it is in reach and eligible.
    pub fn check_paddle_collision(&mut self, ball: &mut Ball, paddle: &Paddle) -> bool {
        if !touches_paddle(ball, paddle, &self.config) {
            return false;
        }

        let is_player = paddle.side == Side::Player;
        if is_player && !self.player_cooldown.ready(self.time.now) {
            return false;
        }

        // Serve contact is eligible in any direction since the ball starts at
        // rest, but a paddle that already struck it needs it coming back
        let fresh_serve_contact =
            self.state.in_serve_sequence() && self.state.last_hit_by != Some(paddle.side);
        if !approaching(ball, paddle.side) && !fresh_serve_contact {
            return false;
        }

        let paddle_vel = if is_player { paddle.vel } else { Vec3::ZERO };
        strike(ball, paddle, paddle_vel, &self.config, &mut self.rng);

        self.state.last_hit_by = Some(paddle.side);
        self.state.rally_count += 1;
        self.state.ball_touched_table = false;
        self.state.receiver_bounces = 0;
        if is_player {
            self.player_cooldown.trigger(self.time.now);
        }

        self.events.push(GameEvent::PaddleHit { side: paddle.side });
        self.events.push(GameEvent::RallyChanged(self.state.rally_count));
        debug!(
            "{:?} hit, rally {}: vel={:?}",
            paddle.side, self.state.rally_count, ball.vel
        );
        true
    }

    /// Evaluate rule violations in priority order: out of bounds, then the
    /// alternating-bounce rule, then a let on serve. Returns whether a point
    /// or let was decided.
    pub fn check_rules(&mut self, ball: &mut Ball, server: &Paddle) -> bool {
        let config = &self.config;
        let side_limit = config.half_width() + config.ball_radius + Params::OUT_SIDE_MARGIN;
        let out_wide = ball.pos.x.abs() > side_limit;
        let out_low = ball.pos.y < config.table_top_y - Params::OUT_FLOOR_DEPTH;
        let out_long = ball.pos.z.abs() > config.half_length() + Params::OUT_END_MARGIN;

        if out_wide || out_low || out_long {
            let winner = self.state.last_hit_by.map_or(Side::Player, Side::opposite);
            return self.score_point(ball, server, winner, PointReason::OutOfBounds);
        }

        if self.state.ball_in_play
            && self.state.ball_touched_table
            && !self.state.in_serve_sequence()
        {
            if let Some(hitter) = self.state.last_hit_by {
                let expected = hitter.opposite();
                if self.state.last_bounce_side != Some(expected) {
                    return self.score_point(ball, server, expected, PointReason::WrongSide);
                }
                if self.state.receiver_bounces >= 2 {
                    return self.score_point(ball, server, hitter, PointReason::DoubleBounce);
                }
            }
        }

        if self.state.serve_net_touch {
            debug!("Let: serve {} touched the net", self.state.serve_count);
            self.events.push(GameEvent::Let);
            self.prepare_serve(ball, server);
            self.tick_outcome = TickOutcome::Let;
            return true;
        }

        false
    }

    /// Award a point, then either end the match or set up the next serve.
    pub fn score_point(
        &mut self,
        ball: &mut Ball,
        server: &Paddle,
        winner: Side,
        reason: PointReason,
    ) -> bool {
        self.score.increment(winner);
        self.events.push(GameEvent::PointScored { winner, reason });
        self.events.push(GameEvent::ScoreChanged {
            player: self.score.player,
            opponent: self.score.opponent,
        });
        info!(
            "Point to {:?} ({:?}): {}-{}",
            winner, reason, self.score.player, self.score.opponent
        );

        if let Some(match_winner) = self.score.has_winner() {
            self.state.winner = Some(match_winner);
            self.state.is_playing = false;
            self.state.is_serving = false;
            self.state.ball_in_play = false;
            self.state.serve_stage = ServeStage::None;
            self.events.push(GameEvent::MatchOver {
                winner: match_winner,
            });
            info!(
                "{:?} wins the match {}-{}",
                match_winner, self.score.player, self.score.opponent
            );
            self.tick_outcome = TickOutcome::MatchOver {
                winner: match_winner,
            };
        } else {
            self.prepare_serve(ball, server);
            self.tick_outcome = TickOutcome::Point { winner, reason };
        }
        true
    }

    fn prepare_serve(&mut self, ball: &mut Ball, server: &Paddle) {
        self.state.is_serving = true;
        self.state.ball_in_play = false;
        self.state.last_hit_by = None;
        self.state.ball_touched_table = false;
        self.state.last_bounce_side = None;
        self.state.serve_stage = ServeStage::NeedServerBounce;
        self.state.serve_net_touch = false;
        self.state.net_contact = false;
        self.state.receiver_bounces = 0;
        self.state.rally_count = 0;
        self.state.serve_count += 1;

        ball.pos = Vec3::new(
            0.0,
            self.config.table_top_y + Params::SERVE_BALL_LIFT,
            server.pos.z + server.side.return_direction() * Params::SERVE_BALL_OFFSET,
        );
        ball.stop();

        self.events.push(GameEvent::RallyChanged(0));
        self.events.push(GameEvent::ServePrompt {
            serve: self.state.serve_count,
        });
    }
}

/// Where the ball hovers while the server lines up.
pub fn serve_follow_position(server: &Paddle) -> Vec3 {
    server.pos
        + Vec3::new(
            0.0,
            Params::SERVE_FOLLOW_LIFT,
            server.side.return_direction() * Params::SERVE_BALL_OFFSET,
        )
}
