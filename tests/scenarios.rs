//! End-to-end gameplay scenarios driven through the public API

use snowman_defense::Settings;
use snowman_defense::consts::{FIRE_COOLDOWN_MS, TICK_PERIOD_MS, WIDTH};
use snowman_defense::sim::{Cell, Grid, Session, SessionEvent, SessionState, advance};

fn no_spawns() -> Settings {
    Settings {
        spawn_chance: 0.0,
        ..Settings::default()
    }
}

fn lane_with(cells: &[(usize, Cell)]) -> Grid {
    let mut grid = Grid::empty();
    for &(i, cell) in cells {
        grid.set(i, cell);
    }
    grid
}

#[test]
fn snowman_walks_the_lane_then_scores_a_miss() {
    let mut session = Session::with_grid(no_spawns(), 0, lane_with(&[(WIDTH - 1, Cell::Adversary)]));
    session.start();

    session.advance_clock(39 * TICK_PERIOD_MS);
    assert_eq!(session.grid()[0], Cell::Adversary);
    assert_eq!(session.misses(), 0);

    let events = session.advance_clock(40 * TICK_PERIOD_MS);
    assert_eq!(events, vec![SessionEvent::Missed { misses: 1 }]);
    assert_eq!(session.misses(), 1);
    assert!(session.grid().is_clear());
}

#[test]
fn adjacent_pair_becomes_one_impact() {
    let out = advance(&lane_with(&[(5, Cell::Projectile), (6, Cell::Adversary)]));
    assert_eq!(out.grid[6], Cell::Impact);
    assert_eq!(out.score_delta, 1);
    assert_eq!(out.miss_delta, 0);
    assert_eq!(out.grid.token_count(), 0);
    assert_eq!(out.grid.count(Cell::Impact), 1);

    // The impact is gone one step later with no further effect
    let after = advance(&out.grid);
    assert!(after.grid.is_clear());
    assert_eq!((after.score_delta, after.miss_delta), (0, 0));
}

#[test]
fn double_fire_inside_cooldown_places_one_projectile() {
    let mut session = Session::new(no_spawns(), 0);
    session.start();

    assert_eq!(session.fire(), vec![SessionEvent::Fired]);
    session.advance_clock(TICK_PERIOD_MS);
    assert!(session.fire().is_empty());
    assert_eq!(session.grid().count(Cell::Projectile), 1);

    // Once the cooldown has elapsed fire works again
    session.advance_clock(FIRE_COOLDOWN_MS);
    assert!(session.can_fire());
    assert_eq!(session.fire(), vec![SessionEvent::Fired]);
    assert_eq!(session.grid().count(Cell::Projectile), 2);
}

#[test]
fn fifth_miss_ends_the_run_until_restart() {
    // A convoy at the base loses exactly one snowman per tick
    let convoy: Vec<(usize, Cell)> = (0..5).map(|i| (i, Cell::Adversary)).collect();
    let mut session = Session::with_grid(no_spawns(), 0, lane_with(&convoy));
    session.start();

    for misses in 1..=4u32 {
        let events = session.advance_clock(u64::from(misses) * TICK_PERIOD_MS);
        assert_eq!(events, vec![SessionEvent::Missed { misses }]);
        assert!(!session.is_over());
    }

    let events = session.advance_clock(5 * TICK_PERIOD_MS);
    assert_eq!(
        events,
        vec![
            SessionEvent::Missed { misses: 5 },
            SessionEvent::GameOver { score: 0 }
        ]
    );
    assert!(session.is_over());
    assert!(!session.is_running());

    let before = session.state().clone();
    assert!(session.tick().is_empty());
    assert!(session.fire().is_empty());
    session.advance_clock(session.now() + 100 * TICK_PERIOD_MS);
    assert_eq!(session.state(), &before);

    assert_eq!(session.restart(), vec![SessionEvent::Restarted]);
    assert!(!session.is_over());
    assert!(session.is_running());
}

#[test]
fn restart_always_yields_a_fresh_session() {
    let settings = Settings {
        max_misses: 1,
        ..no_spawns()
    };
    for seed in 0..5 {
        let lane = lane_with(&[(0, Cell::Adversary), (10, Cell::Projectile), (20, Cell::Adversary)]);
        let mut session = Session::with_grid(settings.clone(), seed, lane);
        session.fire();
        session.run_for(3);
        assert!(session.is_over());

        session.restart();
        assert_eq!(session.state(), &SessionState::default());
        assert!(session.grid().is_clear());
        assert!(session.can_fire());
    }
}
