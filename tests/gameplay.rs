//! End-to-end runs through the public driver API.

use flappy_sim::{
    Difficulty, FixedStep, Game, GameEvent, JsonFileStore, MemoryStore, NullPresenter, Phase,
    Presenter, Schedule, ScoreStore, Snapshot,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct Recorder {
    frames: usize,
    events: Vec<GameEvent>,
    phases: Vec<Phase>,
}

impl Presenter for Recorder {
    fn present(&mut self, view: &Snapshot<'_>, events: &[GameEvent]) -> flappy_sim::Result<()> {
        self.frames += 1;
        self.events.extend_from_slice(events);
        self.phases.push(view.phase);
        Ok(())
    }
}

fn game(difficulty: Difficulty, seed: u64) -> Game<MemoryStore, StdRng> {
    Game::new(difficulty, MemoryStore::default(), StdRng::seed_from_u64(seed))
}

/// Jumps every `every` frames, starting on the first one.
fn play<S: ScoreStore>(game: &mut Game<S, StdRng>, frames: u64, every: u64, rec: &mut Recorder) {
    for f in 0..frames {
        if f % every == 0 {
            game.jump();
        }
        if game.frame(rec).unwrap() == Schedule::Suspend {
            break;
        }
    }
}

#[test]
fn test_easy_run_without_input_falls_to_the_ground() {
    let mut game = game(Difficulty::Easy, 1);
    game.start(Difficulty::Easy);
    let frames = FixedStep::new(400).run(&mut game, &mut NullPresenter).unwrap();

    // y = 300 + 0.1 * n(n+1)/2 crosses 470 on tick 58
    assert_eq!(frames, 58);
    assert_eq!(game.phase(), Phase::Over);
    // First pipe only spawns on tick 120
    assert_eq!(game.score(), 0);
    assert!(game.state().obstacles.is_empty());
}

#[test]
fn test_run_over_event_reported_once() {
    let mut game = game(Difficulty::Easy, 2);
    game.restart();
    let mut rec = Recorder::default();
    FixedStep::new(400).run(&mut game, &mut rec).unwrap();

    let overs: Vec<_> = rec
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::RunOver { .. }))
        .collect();
    assert_eq!(
        overs,
        vec![&GameEvent::RunOver {
            score: 0,
            new_high_score: false
        }]
    );
    assert_eq!(rec.phases.last(), Some(&Phase::Over));
    assert!(rec.phases[..rec.phases.len() - 1].iter().all(|p| *p == Phase::Running));
}

#[test]
fn test_idle_game_suspends_without_moving() {
    let mut game = game(Difficulty::Hard, 3);
    let bird_y = game.state().bird.y;
    let mut rec = Recorder::default();
    assert_eq!(game.frame(&mut rec).unwrap(), Schedule::Suspend);
    assert_eq!(rec.frames, 1);
    assert_eq!(game.state().bird.y, bird_y);
    assert_eq!(game.state().run.frame_count, 0);
}

#[test]
fn test_jumping_keeps_bird_aloft_and_pipes_spawn() {
    let mut game = game(Difficulty::Hard, 4);
    game.restart();
    let mut rec = Recorder::default();
    play(&mut game, 125, 40, &mut rec);

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.state().run.frame_count, 125);
    assert_eq!(game.state().obstacles.len(), 1);
    // Spawned at 400 on tick 120, moved 4px on each of ticks 120..=125
    assert_eq!(game.state().obstacles[0].x, 376.0);
}

#[test]
fn test_velocity_tracks_gravity_and_jump() {
    let mut game = game(Difficulty::Medium, 5);
    game.restart();
    for _ in 0..10 {
        let before = game.state().bird.velocity;
        game.tick();
        assert!((game.state().bird.velocity - before - 0.2).abs() < 1e-9);
    }
    game.jump();
    assert_eq!(game.state().bird.velocity, -4.0);
}

#[test]
fn test_same_seed_same_run() {
    let mut a = game(Difficulty::Medium, 99);
    let mut b = game(Difficulty::Medium, 99);
    a.restart();
    b.restart();
    let (mut ra, mut rb) = (Recorder::default(), Recorder::default());
    play(&mut a, 600, 27, &mut ra);
    play(&mut b, 600, 27, &mut rb);

    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.score(), b.score());
    assert_eq!(ra.events, rb.events);
    assert_eq!(a.state().obstacles, b.state().obstacles);
    assert_eq!(a.state().clouds, b.state().clouds);
}

#[test]
fn test_restart_after_game_over_starts_clean() {
    let mut game = game(Difficulty::Hard, 6);
    game.restart();
    FixedStep::new(1_000).run(&mut game, &mut NullPresenter).unwrap();
    assert_eq!(game.phase(), Phase::Over);

    game.start(Difficulty::Medium);
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score(), 0);
    assert!(game.state().obstacles.is_empty());
    assert_eq!(game.state().run.frame_count, 0);
    assert_eq!(game.state().run.speed, 3.0);
}

#[test]
fn test_difficulty_change_applies_on_next_start() {
    let mut game = game(Difficulty::Hard, 7);
    game.restart();
    game.tick();
    game.set_difficulty(Difficulty::Easy);
    game.tick();
    assert_eq!(game.active_difficulty(), Difficulty::Hard);
    assert_eq!(game.state().bird.gravity, 0.3);
    assert_eq!(game.snapshot().gap, 120.0);

    game.restart();
    assert_eq!(game.active_difficulty(), Difficulty::Easy);
    assert_eq!(game.snapshot().gap, 280.0);
}

#[test]
fn test_unknown_tag_starts_hard() {
    let mut game = game(Difficulty::Easy, 8);
    game.start(Difficulty::from_tag("impossible"));
    assert_eq!(game.active_difficulty(), Difficulty::Hard);
    assert_eq!(game.state().run.speed, 4.0);
}

#[test]
fn test_persisted_best_survives_a_worse_run() {
    let path = std::env::temp_dir()
        .join(format!("flappy-sim-it-{}", std::process::id()))
        .join("high_score.json");
    let mut store = JsonFileStore::new(&path);
    store.save(7).unwrap();

    let mut game = Game::new(Difficulty::Easy, store, StdRng::seed_from_u64(10));
    assert_eq!(game.high_score(), 7);
    game.restart();
    FixedStep::new(400).run(&mut game, &mut NullPresenter).unwrap();
    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), 7);

    let mut reread = JsonFileStore::new(&path);
    assert_eq!(reread.load().unwrap(), 7);
    std::fs::remove_file(path).ok();
}
