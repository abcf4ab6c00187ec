//! Per-frame update
//!
//! One call to `tick` runs the input, physics, level-up and reset phases in
//! that order against a single clock reading.

use super::collision::{Alignment, check_alignment};
use super::state::{GameState, RoundState};

/// Message texts
pub mod messages {
    pub const SUCCESS: &str = "Great Job!";
    pub const HALFWAY: &str = "You're halfway to the next level!";
    pub const MISS: &str = "Try Again!";
    pub const ENCOURAGEMENT: &str = "Take a deep breath and continue!";

    pub fn level_up(level: u32) -> String {
        format!("Level {}!", level)
    }
}

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Monotonic clock reading for this frame
    pub now_ms: u64,
}

/// Things that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Block landed inside the outline
    Aligned { score: u32, offset: f32 },
    /// Block landed off target
    Missed { offset: f32 },
    LevelUp { level: u32, fall_speed: f32 },
    /// Encouragement replaced the level-up message
    Encouraged { level: u32 },
    /// New block and outline spawned
    RoundReset,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let now = input.now_ms;

    match state.round {
        RoundState::Falling => {
            apply_movement(state, input);
            apply_fall(state, now, &mut events);
        }
        RoundState::Landed => {
            if state.message.is_expired(now) {
                state.reset_round();
                events.push(GameEvent::RoundReset);
            }
        }
    }

    state.message.clear_expired(now);
    events
}

/// Steer the block; both keys held cancel out
fn apply_movement(state: &mut GameState, input: &TickInput) {
    let step = state.config.move_speed;
    let max_x = state.config.max_x();

    if input.left {
        state.shape.shift(-step, max_x);
    }
    if input.right {
        state.shape.shift(step, max_x);
    }
}

fn apply_fall(state: &mut GameState, now: u64, events: &mut Vec<GameEvent>) {
    state.shape.fall();

    let alignment = check_alignment(
        &state.shape.rect(),
        &state.outline.rect(),
        state.config.alignment_tolerance,
    );

    match alignment {
        Alignment::Pending => {}
        Alignment::Aligned { offset } => {
            state.round = RoundState::Landed;
            state.score = state.score.saturating_add(state.config.points_per_alignment);
            log::info!("Score increased to {}. Level: {}", state.score, state.level);
            events.push(GameEvent::Aligned {
                score: state.score,
                offset,
            });

            let (band_start, band_end) = state.config.halfway_band;
            let progress = state.progress_percent();
            if (band_start..band_end).contains(&progress) {
                state.message.set(messages::HALFWAY, now);
            } else {
                state.message.set(messages::SUCCESS, now);
            }

            check_level_up(state, now, events);
        }
        Alignment::Missed { offset } => {
            state.round = RoundState::Landed;
            log::info!("Shape missed the outline.");
            events.push(GameEvent::Missed { offset });
            state.message.set(messages::MISS, now);
        }
    }
}

/// Level up when the score lands on a threshold multiple
fn check_level_up(state: &mut GameState, now: u64, events: &mut Vec<GameEvent>) {
    if state.score % state.config.level_up_score != 0 {
        return;
    }

    state.level += 1;
    state.fall_speed += state.config.fall_speed_increment;
    log::info!(
        "Level up! New level: {}, Fall speed: {}",
        state.level,
        state.fall_speed
    );
    events.push(GameEvent::LevelUp {
        level: state.level,
        fall_speed: state.fall_speed,
    });
    state.message.set(messages::level_up(state.level), now);

    if state.level % state.config.encouragement_every == 0 {
        events.push(GameEvent::Encouraged { level: state.level });
        state.message.set(messages::ENCOURAGEMENT, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    const DURATION: u64 = 2000;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 12345)
    }

    /// Put the block right above the outline so the next fall lands it
    fn about_to_land(state: &mut GameState, dx: f32) {
        state.outline.pos.x = 150.0;
        state.shape.pos = Vec2::new(150.0 + dx, state.outline.pos.y - state.shape.size - 1.0);
        state.shape.fall_speed = 2.0;
    }

    fn input_at(now_ms: u64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    /// Land one aligned block and let the round reset
    fn score_once(state: &mut GameState, now: &mut u64) -> Vec<GameEvent> {
        about_to_land(state, 0.0);
        let events = tick(state, &input_at(*now));
        *now += DURATION;
        tick(state, &input_at(*now));
        *now += 1;
        events
    }

    fn current_text(state: &GameState) -> Option<&str> {
        state.message.current().map(|m| m.text.as_str())
    }

    #[test]
    fn test_tick_falls() {
        let mut state = new_state();
        let speed = state.shape.fall_speed;
        let y = state.shape.pos.y;
        let events = tick(&mut state, &input_at(0));
        assert!(events.is_empty());
        assert_eq!(state.shape.pos.y, y + speed);
        assert_eq!(state.round, RoundState::Falling);
    }

    #[test]
    fn test_aligned_landing_scores() {
        let mut state = new_state();
        about_to_land(&mut state, 4.0);

        let events = tick(&mut state, &input_at(100));
        assert_eq!(state.round, RoundState::Landed);
        assert_eq!(state.score, 10);
        assert_eq!(
            events,
            vec![GameEvent::Aligned {
                score: 10,
                offset: 4.0
            }]
        );
        assert_eq!(current_text(&state), Some(messages::SUCCESS));
    }

    #[test]
    fn test_missed_landing_keeps_score() {
        let mut state = new_state();
        about_to_land(&mut state, 30.0);

        let events = tick(&mut state, &input_at(100));
        assert_eq!(state.round, RoundState::Landed);
        assert_eq!(state.score, 0);
        assert_eq!(events, vec![GameEvent::Missed { offset: 30.0 }]);
        assert_eq!(current_text(&state), Some(messages::MISS));
    }

    #[test]
    fn test_landing_resolves_once() {
        let mut state = new_state();
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(0));
        let y = state.shape.pos.y;

        // Landed block stays put and is never re-scored
        for now in 1..100 {
            let events = tick(&mut state, &input_at(now));
            assert!(events.is_empty());
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.shape.pos.y, y);
    }

    #[test]
    fn test_movement_locked_after_landing() {
        let mut state = new_state();
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(0));
        let x = state.shape.pos.x;

        let input = TickInput {
            left: true,
            now_ms: 10,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.shape.pos.x, x);
    }

    #[test]
    fn test_steering_moves_block() {
        let mut state = new_state();
        state.shape.pos.x = 100.0;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.shape.pos.x, 105.0);

        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.shape.pos.x, 105.0);
    }

    #[test]
    fn test_no_reset_while_message_showing() {
        let mut state = new_state();
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(1000));

        for now in [1000, 1500, 2999] {
            let events = tick(&mut state, &input_at(now));
            assert!(!events.contains(&GameEvent::RoundReset));
            assert_eq!(state.round, RoundState::Landed);
        }

        let events = tick(&mut state, &input_at(3000));
        assert_eq!(events, vec![GameEvent::RoundReset]);
        assert_eq!(state.round, RoundState::Falling);
        assert!(state.message.current().is_none());
    }

    #[test]
    fn test_reset_when_no_message() {
        let mut state = new_state();
        state.round = RoundState::Landed;
        let events = tick(&mut state, &input_at(0));
        assert_eq!(events, vec![GameEvent::RoundReset]);
    }

    #[test]
    fn test_five_alignments_level_up_once() {
        let mut state = new_state();
        let mut now = 0;
        let mut level_ups = Vec::new();

        for _ in 0..5 {
            for event in score_once(&mut state, &mut now) {
                if let GameEvent::LevelUp { level, fall_speed } = event {
                    level_ups.push((state.score, level, fall_speed));
                }
            }
        }

        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert_eq!(level_ups, vec![(50, 2, 2.5)]);
        assert_eq!(state.fall_speed, 2.5);
    }

    #[test]
    fn test_level_up_message_overrides_success() {
        let mut state = new_state();
        state.score = 40;
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(0));
        assert_eq!(current_text(&state), Some("Level 2!"));
    }

    #[test]
    fn test_encouragement_is_final_message() {
        let mut state = new_state();
        state.score = 90;
        state.level = 2;
        about_to_land(&mut state, 0.0);

        let events = tick(&mut state, &input_at(0));
        assert_eq!(state.level, 3);
        assert_eq!(current_text(&state), Some(messages::ENCOURAGEMENT));
        assert!(matches!(events.last(), Some(GameEvent::Encouraged { level: 3 })));
    }

    #[test]
    fn test_large_threshold_landing() {
        let config = GameConfig::from_json(
            r#"{ "level_up_score": 100000000, "points_per_alignment": 50000000 }"#,
            std::path::Path::new("large.json"),
        )
        .unwrap();
        let mut state = GameState::new(config, 8);
        about_to_land(&mut state, 0.0);

        tick(&mut state, &input_at(0));
        assert_eq!(state.score, 50_000_000);
        assert_eq!(state.level, 1);
        assert_eq!(current_text(&state), Some(messages::HALFWAY));
    }

    #[test]
    fn test_score_saturates() {
        let mut state = new_state();
        state.score = u32::MAX - 5;
        about_to_land(&mut state, 0.0);

        tick(&mut state, &input_at(0));
        assert_eq!(state.score, u32::MAX);
        assert_eq!(state.round, RoundState::Landed);
    }

    #[test]
    fn test_halfway_message_band() {
        // 30 of 50 points is 60%, outside [50, 60)
        let mut state = new_state();
        state.score = 20;
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(0));
        assert_eq!(current_text(&state), Some(messages::SUCCESS));

        // 25 of 50 is exactly 50%
        let config = GameConfig {
            points_per_alignment: 5,
            ..Default::default()
        };
        let mut state = GameState::new(config, 1);
        state.score = 20;
        about_to_land(&mut state, 0.0);
        tick(&mut state, &input_at(0));
        assert_eq!(current_text(&state), Some(messages::HALFWAY));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 99999);
        let mut state2 = GameState::new(GameConfig::default(), 99999);

        let mut events1 = Vec::new();
        let mut events2 = Vec::new();
        for frame in 0..2000u64 {
            let input = TickInput {
                left: frame % 7 < 3,
                right: frame % 11 < 4,
                now_ms: frame * 16,
            };
            events1.extend(tick(&mut state1, &input));
            events2.extend(tick(&mut state2, &input));
        }

        assert_eq!(events1, events2);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.shape, state2.shape);
        assert!(events1.contains(&GameEvent::RoundReset));
    }

    proptest! {
        #[test]
        fn prop_block_stays_on_screen(moves in prop::collection::vec(0u8..4, 1..400)) {
            let mut state = GameState::new(GameConfig::default(), 5);
            let max_x = state.config.max_x();
            for (frame, m) in moves.into_iter().enumerate() {
                let input = TickInput {
                    left: m & 1 != 0,
                    right: m & 2 != 0,
                    now_ms: frame as u64 * 16,
                };
                tick(&mut state, &input);
                if state.round == RoundState::Falling {
                    prop_assert!(state.shape.pos.x >= 0.0);
                    prop_assert!(state.shape.pos.x <= max_x);
                }
            }
        }

        #[test]
        fn prop_level_tracks_alignments(hits in 0u32..40) {
            let mut state = new_state();
            let mut now = 0;
            let mut level_ups = 0;
            for _ in 0..hits {
                level_ups += score_once(&mut state, &mut now)
                    .iter()
                    .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
                    .count() as u32;
            }
            let per_level = state.config.level_up_score / state.config.points_per_alignment;
            prop_assert_eq!(state.score, hits * 10);
            prop_assert_eq!(state.level, 1 + hits / per_level);
            prop_assert_eq!(level_ups, hits / per_level);
        }
    }
}
