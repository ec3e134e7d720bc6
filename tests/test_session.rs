use alien_invasion::session::*;

#[test]
fn new_session_is_inactive_with_base_stats() {
    let s = Session::new(3);
    assert_eq!(s.state, SessionState::Inactive);
    assert!(!s.is_active());
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.lives_left, 3);
    assert!(!s.is_paused());
}

#[test]
fn reset_stats_keeps_high_score() {
    let mut s = Session::new(3);
    s.add_points(250);
    s.level = 4;
    s.lives_left = 1;
    s.pause_ticks = 7;

    s.reset_stats(3);

    assert_eq!(s.score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.lives_left, 3);
    assert_eq!(s.pause_ticks, 0);
    assert_eq!(s.high_score, 250);
}

#[test]
fn high_score_follows_score_upwards_only() {
    let mut s = Session::new(3);
    s.add_points(100);
    assert_eq!(s.high_score, 100);
    s.reset_stats(3);
    s.add_points(50);
    assert_eq!(s.score, 50);
    assert_eq!(s.high_score, 100);
    s.add_points(100);
    assert_eq!(s.high_score, 150);
}

#[test]
fn score_saturates() {
    let mut s = Session::new(3);
    s.score = u32::MAX - 10;
    s.add_points(50);
    assert_eq!(s.score, u32::MAX);
    assert_eq!(s.high_score, u32::MAX);
}

// ── lose_life ─────────────────────────────────────────────────────────────────

#[test]
fn losing_a_life_with_lives_left_respawns_and_pauses() {
    let mut s = Session::new(3);
    s.state = SessionState::Active;
    s.lives_left = 2;

    assert_eq!(s.lose_life(15), LifeLost::Respawn);
    assert_eq!(s.lives_left, 1);
    assert_eq!(s.state, SessionState::Active);
    assert_eq!(s.pause_ticks, 15);
    assert!(s.is_paused());
}

#[test]
fn losing_the_last_life_ends_the_game() {
    let mut s = Session::new(3);
    s.state = SessionState::Active;
    s.lives_left = 1;

    assert_eq!(s.lose_life(15), LifeLost::GameOver);
    assert_eq!(s.lives_left, 0);
    assert_eq!(s.state, SessionState::Inactive);
    assert!(!s.is_paused());
}

#[test]
fn lives_saturate_at_zero() {
    let mut s = Session::new(3);
    s.lives_left = 0;
    assert_eq!(s.lose_life(15), LifeLost::GameOver);
    assert_eq!(s.lives_left, 0);
}
