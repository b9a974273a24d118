use glam::Vec3;
use hecs::World;
use pingpong_core::*;

const DT: f32 = 1.0 / 60.0;

struct Match {
    world: World,
    engine: PhysicsEngine,
    opponent: OpponentController,
    controls: Controls,
    queue: InputQueue,
}

impl Match {
    fn new(seed: u64) -> Self {
        let config = Config::new();
        let world = create_scene(&config);
        let controls = Controls::new(&config);
        let engine = PhysicsEngine::new(config, GameRng::new(seed)).unwrap();
        let opponent = OpponentController::new(OpponentSkill::normal(), GameRng::new(seed + 1));
        Self {
            world,
            engine,
            opponent,
            controls,
            queue: InputQueue::new(),
        }
    }

    fn step(&mut self, delta: f32) -> TickOutcome {
        step(
            &mut self.world,
            &mut self.engine,
            &mut self.opponent,
            &mut self.controls,
            &mut self.queue,
            delta,
        )
    }
}

#[test]
fn test_start_and_serve_through_input_queue() {
    let mut game = Match::new(7);

    game.queue.push(InputEvent::Start);
    game.step(DT);
    assert_eq!(game.engine.state.phase(), Phase::Positioning);

    // Ball rides along with the paddle before the serve
    let target = Vec3::new(1.0, game.engine.config().table_top_y + 0.5, 0.0);
    game.queue.push(InputEvent::PointerMoved(target));
    game.step(DT);
    let paddle = read_paddle(&game.world, Side::Player).unwrap();
    assert_eq!(paddle.pos.x, 1.0);
    assert_eq!(read_ball(&game.world).unwrap().pos, serve_follow_position(&paddle));

    game.queue.push(InputEvent::Press);
    game.step(DT);
    assert_eq!(game.engine.state.phase(), Phase::ServeInFlight);
    let ball = read_ball(&game.world).unwrap();
    assert!(ball.vel.z < 0.0, "Serve travels toward the opponent");
    assert!(game.engine.events.contains(&GameEvent::ServeLaunched));
}

#[test]
fn test_frame_delta_is_capped() {
    let mut game = Match::new(1);
    game.queue.push(InputEvent::Start);
    game.step(DT);
    let before = game.engine.time.now;

    // A long stall (tab in background) only advances one capped step
    game.step(2.0);
    assert!((game.engine.time.now - before - Params::MAX_DT).abs() < 1e-6);

    // Negative deltas never run time backwards
    let before = game.engine.time.now;
    game.step(-1.0);
    assert_eq!(game.engine.time.now, before);
}

#[test]
fn test_non_finite_delta_is_ignored() {
    let mut game = Match::new(3);
    game.queue.push(InputEvent::Start);
    game.step(DT);
    game.queue.push(InputEvent::Press);
    game.step(DT);
    let now = game.engine.time.now;
    let ball = read_ball(&game.world).unwrap();

    game.step(f32::NAN);
    game.step(f32::INFINITY);

    assert_eq!(game.engine.time.now, now);
    let after = read_ball(&game.world).unwrap();
    assert!(after.pos.is_finite() && after.vel.is_finite());
    assert_eq!(after.pos, ball.pos, "A zero step does not move the ball");

    // Play carries on normally afterwards
    game.step(DT);
    assert!(game.engine.time.now > now);
}

#[test]
fn test_events_cover_only_the_latest_frame() {
    let mut game = Match::new(5);
    game.queue.push(InputEvent::Start);
    game.step(DT);
    assert!(game.engine.events.contains(&GameEvent::StartControlHidden));

    game.step(DT);
    assert!(
        !game.engine.events.contains(&GameEvent::StartControlHidden),
        "Previous frame's events are cleared"
    );
}

#[test]
fn test_served_point_resolves() {
    let mut game = Match::new(42);
    game.queue.push(InputEvent::Start);
    game.step(DT);
    game.queue.push(InputEvent::Press);

    let mut outcome = TickOutcome::Continue;
    for _ in 0..600 {
        outcome = game.step(DT);
        if outcome.is_terminal() {
            break;
        }
    }

    assert!(outcome.is_terminal(), "The serve should resolve within ten seconds");
    let score = game.engine.score;
    match outcome {
        TickOutcome::Point { .. } => assert_eq!(score.player + score.opponent, 1),
        TickOutcome::Let => assert_eq!(score, Score::new()),
        other => panic!("Unexpected outcome {:?}", other),
    }
    assert_eq!(game.engine.state.phase(), Phase::Positioning, "Next serve is ready");
    assert_eq!(game.engine.state.serve_count, 2);
}

#[test]
fn test_full_match_against_tracking_player() {
    let mut game = Match::new(2024);
    game.queue.push(InputEvent::Start);
    game.step(DT);

    let mut last = game.engine.score;
    let mut finished = None;

    for tick in 0..200_000 {
        if game.engine.state.is_serving {
            game.queue.push(InputEvent::Press);
        } else if let Some(ball) = read_ball(&game.world) {
            // Follow the ball sideways and in height
            game.queue.push(InputEvent::PointerMoved(ball.pos));
        }

        let outcome = game.step(DT);
        let score = game.engine.score;

        assert!(
            score.player >= last.player && score.opponent >= last.opponent,
            "Scores never decrease (tick {})",
            tick
        );
        let gained = (score.player + score.opponent) - (last.player + last.opponent);
        match outcome {
            TickOutcome::Continue | TickOutcome::Let => {
                assert_eq!(gained, 0, "No score change without a point (tick {})", tick)
            }
            TickOutcome::Point { winner, .. } => {
                assert_eq!(gained, 1, "One point per tick (tick {})", tick);
                assert_eq!(score.get(winner), last.get(winner) + 1);
            }
            TickOutcome::MatchOver { winner } => {
                assert_eq!(gained, 1);
                finished = Some(winner);
                break;
            }
        }
        last = score;
    }

    let winner = finished.expect("Match should finish");
    let score = game.engine.score;
    let (won, lost) = match winner {
        Side::Player => (score.player, score.opponent),
        Side::Opponent => (score.opponent, score.player),
    };
    assert!(won >= Params::WIN_SCORE);
    assert!(won - lost >= Params::WIN_MARGIN);
    assert_eq!(game.engine.state.phase(), Phase::MatchOver);

    // Restart clears the board
    game.queue.push(InputEvent::Start);
    game.step(DT);
    assert_eq!(game.engine.score, Score::new());
    assert_eq!(game.engine.state.phase(), Phase::Positioning);
}

#[test]
fn test_same_seed_same_match() {
    let run = |seed: u64| {
        let mut game = Match::new(seed);
        game.queue.push(InputEvent::Start);
        game.step(DT);
        let mut outcomes = Vec::new();
        for _ in 0..3_000 {
            if game.engine.state.is_serving {
                game.queue.push(InputEvent::Press);
            }
            let outcome = game.step(DT);
            if outcome.is_terminal() {
                outcomes.push(outcome);
            }
        }
        (outcomes, game.engine.score)
    };

    assert_eq!(run(99), run(99));
}
