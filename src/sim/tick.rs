//! Fixed timestep simulation tick
//!
//! One call advances the world by one tick, in a fixed order: brick
//! collisions, item fall/catch, ball motion against walls and paddle, then
//! paddle movement. Terminal events short-circuit the rest of the tick.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{Ball, GamePhase, GameState, Item, ItemKind, TerminalEvent};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
///
/// Current-state sampling only; held keys are reported as true every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the paddle left
    pub left: bool,
    /// Move the paddle right (wins if both directions are held)
    pub right: bool,
    /// Begin play from the waiting state
    pub start: bool,
    /// Demo mode - auto-start and steer the paddle under the lowest
    /// descending ball
    pub autopilot: bool,
}

/// Advance the game state by one tick.
///
/// Returns the terminal event on the tick it fires; terminal states make
/// further calls no-ops.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<TerminalEvent> {
    if state.phase.is_terminal() {
        return None;
    }

    let input = shape_input(state, input);

    if state.phase == GamePhase::NotStarted {
        if input.start {
            state.phase = GamePhase::Running;
            log::info!("game started");
        }
        return None;
    }

    state.time_ticks += 1;

    if let Some(event) = brick_collisions(state) {
        return Some(event);
    }
    update_items(state);
    if let Some(event) = move_balls(state) {
        return Some(event);
    }
    move_paddle(state, &input);
    None
}

/// Autopilot: start immediately and chase the most dangerous ball - the
/// lowest one that is descending, falling back to the lowest overall.
fn shape_input(state: &GameState, input: &TickInput) -> TickInput {
    if !input.autopilot {
        return *input;
    }

    let lowest = |descending_only: bool| {
        state
            .balls
            .iter()
            .filter(|b| !descending_only || b.vel.y > 0.0)
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    };

    let mut shaped = *input;
    shaped.start = true;
    if let Some(ball) = lowest(true).or_else(|| lowest(false)) {
        let center = state.paddle.x + state.paddle.width / 2.0;
        shaped.left = ball.pos.x < center - PADDLE_STEP;
        shaped.right = ball.pos.x > center + PADDLE_STEP;
    }
    shaped
}

/// Brick collision scan: columns outer, rows inner (the bricks are stored
/// column-major), balls innermost. The first ball found inside a brick wins
/// that brick for the tick; each brick scores at most once.
fn brick_collisions(state: &mut GameState) -> Option<TerminalEvent> {
    let size = state.layout.brick_size();
    let winning = state.winning_score();

    for i in 0..state.bricks.len() {
        if !state.bricks[i].alive {
            continue;
        }
        let origin = state.bricks[i].origin;
        let Some(ball) = state
            .balls
            .iter_mut()
            .find(|b| collision::center_in_rect(b.pos, origin, size))
        else {
            continue;
        };

        ball.vel.y = -ball.vel.y;
        state.bricks[i].alive = false;
        state.score += 1;
        log::debug!(
            "brick ({}, {}) destroyed, score {}",
            state.bricks[i].col,
            state.bricks[i].row,
            state.score
        );
        maybe_drop_item(state, origin + size / 2.0);

        if state.score == winning {
            state.phase = GamePhase::Won;
            log::info!("all bricks cleared at tick {}", state.time_ticks);
            return Some(TerminalEvent::Won);
        }
    }
    None
}

/// Roll the drop chance and spawn an item of uniformly random kind centered
/// on the destroyed brick.
fn maybe_drop_item(state: &mut GameState, center: Vec2) {
    if state.rng.random::<f32>() < ITEM_DROP_CHANCE {
        let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
        log::debug!("item {:?} dropped at {}", kind, center);
        state.items.push(Item {
            pos: center,
            kind,
            vy: ITEM_FALL_SPEED,
            active: true,
        });
    }
}

/// Advance falling items, resolve catches, and compact the inert ones.
fn update_items(state: &mut GameState) {
    let field_height = state.layout.field_height;

    // Collect caught kinds first (effects touch the ball set)
    let mut caught: Vec<ItemKind> = Vec::new();
    for item in state.items.iter_mut() {
        if !item.active {
            continue;
        }
        item.pos.y += item.vy;
        if collision::item_caught(
            item.pos,
            ITEM_RADIUS,
            state.paddle.x,
            state.paddle.width,
            state.paddle.height,
            field_height,
        ) {
            item.active = false;
            caught.push(item.kind);
        } else if collision::item_below_field(item.pos.y, ITEM_RADIUS, field_height) {
            item.active = false;
        }
    }

    for kind in caught {
        apply_item(state, kind);
    }

    // Inert items are only ever flagged above; compacting here keeps storage
    // bounded without changing what any pass can observe
    state.items.retain(|item| item.active);
}

/// Apply a caught item's effect to every active ball.
fn apply_item(state: &mut GameState, kind: ItemKind) {
    log::debug!("item caught: {:?}", kind);
    match kind {
        ItemKind::Multi => {
            let copies: Vec<Ball> = state.balls.iter().map(Ball::split).collect();
            state.balls.extend(copies);
        }
        ItemKind::Big => {
            for ball in &mut state.balls {
                ball.grow();
            }
        }
        ItemKind::Small => {
            for ball in &mut state.balls {
                ball.shrink();
            }
        }
    }
}

/// Wall and paddle interaction, then motion, for every ball. Scanned
/// back-to-front so removal preserves the survivors' order. A bounce inverts
/// velocity before the position update, so the reflection lands this tick.
fn move_balls(state: &mut GameState) -> Option<TerminalEvent> {
    let field_width = state.layout.field_width;
    let field_height = state.layout.field_height;
    let paddle_x = state.paddle.x;
    let paddle_width = state.paddle.width;

    for i in (0..state.balls.len()).rev() {
        let lost = {
            let ball = &mut state.balls[i];
            if collision::crosses_side_wall(ball.pos.x, ball.vel.x, ball.radius, field_width) {
                ball.vel.x = -ball.vel.x;
            }
            if collision::crosses_ceiling(ball.pos.y, ball.vel.y, ball.radius) {
                ball.vel.y = -ball.vel.y;
                false
            } else if collision::reaches_floor(ball.pos.y, ball.vel.y, ball.radius, field_height) {
                // Paddle bounce tests the ball's current x against the span
                if collision::within_span(ball.pos.x, paddle_x, paddle_width) {
                    ball.vel.y = -ball.vel.y;
                    false
                } else {
                    true
                }
            } else {
                false
            }
        };

        if lost {
            state.balls.remove(i);
            log::debug!("ball lost, {} in play", state.balls.len());
            continue;
        }

        let ball = &mut state.balls[i];
        ball.pos += ball.vel;
    }

    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            log::info!("out of lives at tick {}", state.time_ticks);
            return Some(TerminalEvent::Lost);
        }
        log::info!("life lost, {} remaining", state.lives);
        state.reset_after_life_loss();
    }
    None
}

/// One paddle step per tick; right wins when both directions are held.
fn move_paddle(state: &mut GameState, input: &TickInput) {
    let field_width = state.layout.field_width;
    let paddle = &mut state.paddle;
    if input.right && paddle.x < field_width - paddle.width {
        paddle.x += PADDLE_STEP;
    } else if input.left && paddle.x > 0.0 {
        paddle.x -= PADDLE_STEP;
    }
    paddle.clamp_to(field_width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GridLayout;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(GridLayout::standard().unwrap(), seed)
    }

    /// Fresh state already past the start gate.
    fn running_state(seed: u64) -> GameState {
        let mut state = new_state(seed);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    fn brick_center(state: &GameState, index: usize) -> Vec2 {
        state.bricks[index].origin + state.layout.brick_size() / 2.0
    }

    #[test]
    fn test_start_gate() {
        let mut state = new_state(1);
        let before = state.balls[0].pos;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.balls[0].pos, before);
        assert_eq!(state.time_ticks, 0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_brick_hit_flips_ball_and_scores() {
        let mut state = running_state(1);
        state.balls[0].pos = brick_center(&state, 0);
        state.balls[0].vel = Vec2::new(4.0, -4.0);

        tick(&mut state, &TickInput::default());

        assert!(!state.bricks[0].alive);
        assert_eq!(state.score, 1);
        assert_eq!(state.balls[0].vel.y, 4.0);
    }

    #[test]
    fn test_one_hit_per_brick_per_tick() {
        let mut state = running_state(1);
        // Two balls inside the same brick: only the first registers
        let center = brick_center(&state, 0);
        state.balls[0].pos = center;
        state.balls[0].vel = Vec2::new(4.0, -4.0);
        let mut second = state.balls[0].clone();
        second.pos = center + Vec2::new(2.0, 2.0);
        state.balls.push(second);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 1);
        assert_eq!(state.balls[0].vel.y, 4.0);
        // The second ball keeps its downward velocity untouched
        assert_eq!(state.balls[1].vel.y, -4.0);
    }

    #[test]
    fn test_item_drop_is_seeded() {
        let mut saw_drop = false;
        let mut saw_no_drop = false;
        for seed in 0..64 {
            let mut state = running_state(seed);
            state.balls[0].pos = brick_center(&state, 0);
            state.balls[0].vel = Vec2::new(4.0, -4.0);
            tick(&mut state, &TickInput::default());

            if let Some(item) = state.items.first() {
                saw_drop = true;
                assert!(item.active);
                assert_eq!(item.vy, ITEM_FALL_SPEED);
                // One fall step already applied this tick
                assert_eq!(
                    item.pos,
                    brick_center(&state, 0) + Vec2::new(0.0, ITEM_FALL_SPEED)
                );
            } else {
                saw_no_drop = true;
            }
        }
        // With a 30% drop chance, 64 seeds exercise both outcomes
        assert!(saw_drop && saw_no_drop);
    }

    #[test]
    fn test_multi_item_doubles_balls() {
        let mut state = running_state(1);
        state.balls[0].pos = Vec2::new(200.0, 400.0);
        state.balls[0].vel = Vec2::new(4.0, -4.0);
        let mut second = state.balls[0].clone();
        second.pos = Vec2::new(300.0, 420.0);
        second.vel = Vec2::new(-4.0, -4.0);
        state.balls.push(second);

        // Item one fall step above the catch window, centered on the paddle
        state.items.push(Item {
            pos: Vec2::new(
                state.paddle.x + state.paddle.width / 2.0,
                state.layout.field_height - state.paddle.height - ITEM_RADIUS + 1.0,
            ),
            kind: ItemKind::Multi,
            vy: ITEM_FALL_SPEED,
            active: true,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.balls.len(), 4);
        // Copies follow their sources, with mirrored horizontal velocity
        assert_eq!(state.balls[2].vel.x, -state.balls[0].vel.x);
        assert_eq!(state.balls[3].vel.x, -state.balls[1].vel.x);
        // Caught item was compacted away
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_missed_item_expires_without_effect() {
        let mut state = running_state(1);
        state.paddle.x = 0.0;
        state.items.push(Item {
            pos: Vec2::new(900.0, state.layout.field_height + ITEM_RADIUS),
            kind: ItemKind::Big,
            vy: ITEM_FALL_SPEED,
            active: true,
        });
        let radius_before = state.balls[0].radius;

        tick(&mut state, &TickInput::default());

        assert!(state.items.is_empty());
        assert_eq!(state.balls[0].radius, radius_before);
    }

    #[test]
    fn test_ball_loss_and_canonical_respawn() {
        let mut state = running_state(1);
        state.paddle.x = 800.0;
        state.balls[0].pos = Vec2::new(100.0, 626.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(480.0, 580.0));
        assert_eq!(state.balls[0].vel, Vec2::new(BALL_START_DX, BALL_START_DY));
        assert_eq!(state.paddle.x, (960.0 - state.paddle.width) / 2.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_paddle_saves_ball() {
        let mut state = running_state(1);
        state.balls[0].pos = Vec2::new(480.0, 626.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        // Paddle is centered, ball x within its span
        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].vel.y, -4.0);
    }

    #[test]
    fn test_loss_fires_exactly_once() {
        let mut state = running_state(1);
        state.lives = 1;
        state.paddle.x = 800.0;
        state.balls[0].pos = Vec2::new(100.0, 626.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);

        let event = tick(&mut state, &TickInput::default());
        assert_eq!(event, Some(TerminalEvent::Lost));
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.lives, 0);

        // Terminal state: further ticks are no-ops
        let ticks = state.time_ticks;
        assert_eq!(tick(&mut state, &TickInput::default()), None);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_win_fires_before_further_processing() {
        let mut state = running_state(1);
        for brick in state.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        state.score = state.winning_score() - 1;
        state.balls[0].pos = brick_center(&state, 0);
        state.balls[0].vel = Vec2::new(4.0, -4.0);

        // A falling item and the ball itself must be untouched after the win
        let item_pos = Vec2::new(500.0, 300.0);
        state.items.push(Item {
            pos: item_pos,
            kind: ItemKind::Small,
            vy: ITEM_FALL_SPEED,
            active: true,
        });
        let ball_pos = state.balls[0].pos;

        let event = tick(&mut state, &TickInput::default());
        assert_eq!(event, Some(TerminalEvent::Won));
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, state.winning_score());
        assert_eq!(state.items[0].pos, item_pos);
        assert_eq!(state.balls[0].pos, ball_pos);
    }

    #[test]
    fn test_wall_bounce_reflects_same_tick() {
        let mut state = running_state(1);
        state.balls[0].pos = Vec2::new(14.0, 300.0);
        state.balls[0].vel = Vec2::new(-4.0, 4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.balls[0].vel, Vec2::new(4.0, 4.0));
        assert_eq!(state.balls[0].pos, Vec2::new(18.0, 304.0));
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = running_state(1);
        state.balls[0].pos = Vec2::new(300.0, 14.0);
        state.balls[0].vel = Vec2::new(4.0, -4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.balls[0].vel, Vec2::new(4.0, 4.0));
        assert_eq!(state.balls[0].pos, Vec2::new(304.0, 18.0));
    }

    #[test]
    fn test_paddle_right_priority_and_clamp() {
        let mut state = running_state(1);
        let x = state.paddle.x;
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.paddle.x, x + PADDLE_STEP);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.paddle.x, x);

        // A step past the bound is clamped back onto it
        state.paddle.x = state.layout.field_width - state.paddle.width - 1.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert_eq!(
            state.paddle.x,
            state.layout.field_width - state.paddle.width
        );
    }

    #[test]
    fn test_autopilot_tracks_lowest_ball() {
        let mut state = new_state(1);
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // Autopilot starts the game on its own
        tick(&mut state, &auto);
        assert_eq!(state.phase, GamePhase::Running);

        state.balls[0].pos = Vec2::new(100.0, 400.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        let x = state.paddle.x;
        tick(&mut state, &auto);
        assert_eq!(state.paddle.x, x - PADDLE_STEP);
    }

    #[test]
    fn test_determinism_same_seed_same_snapshot() {
        let mut a = new_state(99_999);
        let mut b = new_state(99_999);
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..240 {
            tick(&mut a, &auto);
            tick(&mut b, &auto);
        }
        let snap_a = serde_json::to_string(&a).unwrap();
        let snap_b = serde_json::to_string(&b).unwrap();
        assert_eq!(snap_a, snap_b);
    }

    proptest! {
        /// Ball radii stay within bounds under any big/small sequence.
        #[test]
        fn prop_radius_stays_bounded(seq in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut state = running_state(1);
            for big in seq {
                apply_item(
                    &mut state,
                    if big { ItemKind::Big } else { ItemKind::Small },
                );
                for ball in &state.balls {
                    prop_assert!(ball.radius >= BALL_RADIUS_MIN);
                    prop_assert!(ball.radius <= BALL_RADIUS_MAX);
                }
            }
        }

        /// Score never decreases and never exceeds the brick count, whatever
        /// the inputs.
        #[test]
        fn prop_score_monotonic_and_capped(
            seed in 0u64..1000,
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..300),
        ) {
            let mut state = running_state(seed);
            let mut last_score = state.score;
            for (left, right) in inputs {
                let input = TickInput { left, right, ..Default::default() };
                tick(&mut state, &input);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.score <= state.winning_score());
                last_score = state.score;
            }
        }
    }
}
