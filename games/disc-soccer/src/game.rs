//! Disc soccer: two sides of three discs flick a ball into each other's goal.
//! Strictly alternating turns; a turn passes only once every body has stopped.

use flick_engine::{
    ColliderMaterial, EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue,
};
use glam::Vec2;

use crate::aim::{AimController, AimPreview};
use crate::config::{ConfigError, MatchConfig};
use crate::goal::detect_goal;
use crate::pitch::Pitch;
use crate::registry::Registry;
use crate::side::Side;
use crate::state::MatchState;

/// Custom event kinds from the UI
pub mod events {
    /// New match position; the score is kept.
    pub const RESET: u32 = 1;
}

/// Game event kinds to the UI
pub mod game_events {
    /// a = score A, b = score B
    pub const SCORE: f32 = 1.0;
    /// a = side to move (0 = A, 1 = B), b = 1 while waiting for the table to settle
    pub const TURN: f32 = 2.0;
    /// a, b = capped flick, c = power in [0, 1]. Only while aiming.
    pub const AIM: f32 = 3.0;
    /// a = scoring side
    pub const GOAL: f32 = 4.0;
    /// a = aimed disc's entity id, b, c = its center. Only while aiming.
    pub const AIM_ORIGIN: f32 = 5.0;
    /// a = margin, b = goal width, c = goal depth. Once, after init.
    pub const PITCH: f32 = 6.0;
}

/// `R` resets the position, same as [`events::RESET`].
pub const KEY_RESET: u32 = 82;

pub struct DiscSoccer {
    config: MatchConfig,
    pitch: Pitch,
    registry: Registry,
    state: MatchState,
    aim: AimController,
}

impl DiscSoccer {
    /// A match with the default tuning.
    pub fn new() -> Self {
        Self::from_valid(MatchConfig::default())
    }

    /// A match with custom tuning, validated once here.
    pub fn with_config(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: MatchConfig) -> Self {
        Self {
            pitch: Pitch::from_config(&config),
            registry: Registry::new(&config),
            state: MatchState::new(),
            aim: AimController::new(config.max_flick),
            config,
        }
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn pitch(&self) -> &Pitch {
        &self.pitch
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn aim_preview(&self, ctx: &EngineContext) -> Option<AimPreview> {
        self.aim.preview(ctx)
    }

    fn material(&self) -> ColliderMaterial {
        ColliderMaterial {
            restitution: self.config.restitution,
            friction: self.config.friction,
            density: 1.0,
        }
    }

    /// Back to kick-off: bodies to their canonical spots at rest, side A to
    /// move, no aim in progress. The score is kept.
    pub fn reset_match(&mut self, ctx: &mut EngineContext) {
        self.registry.reset_all(ctx);
        self.state.on_reset();
        self.aim.cancel();
        log::info!("Position reset (score {}-{})", self.state.score_a(), self.state.score_b());
    }

    fn handle_goal(&mut self, ctx: &mut EngineContext, scorer: Side) {
        self.state.on_goal(scorer);
        self.registry.reset_all(ctx);
        self.aim.cancel();
        ctx.emit_event(GameEvent::new(game_events::GOAL, scorer.index() as f32, 0.0, 0.0));
        log::info!(
            "Goal for side {}! Score {}-{}",
            scorer,
            self.state.score_a(),
            self.state.score_b()
        );
    }

    fn emit_hud(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(
            game_events::SCORE,
            self.state.score_a() as f32,
            self.state.score_b() as f32,
            0.0,
        ));
        ctx.emit_event(GameEvent::new(
            game_events::TURN,
            self.state.current_side().index() as f32,
            if self.state.waiting_for_settle() { 1.0 } else { 0.0 },
            0.0,
        ));
        if let Some(preview) = self.aim.preview(ctx) {
            ctx.emit_event(GameEvent::new(
                game_events::AIM,
                preview.flick.x,
                preview.flick.y,
                preview.power,
            ));
            ctx.emit_event(GameEvent::new(
                game_events::AIM_ORIGIN,
                preview.disc.0 as f32,
                preview.origin.x,
                preview.origin.y,
            ));
        }
    }
}

impl Default for DiscSoccer {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for DiscSoccer {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.config.fixed_dt(),
            world_width: self.pitch.width(),
            world_height: self.pitch.height(),
            // A goal per tick at most, plus the per-frame HUD.
            max_events: 64,
            max_instances: 16,
            gravity: Vec2::ZERO, // Top-down table
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.pitch.spawn(ctx, self.material());
        self.registry
            .create_ball(ctx, self.pitch.center(), self.config.ball_radius);
        let center_x = self.pitch.width() / 2.0;
        for side in Side::ALL {
            self.registry.create_team(
                ctx,
                side,
                center_x,
                self.config.team_base_y(side),
                self.config.team_spacing,
                self.config.disc_radius,
            );
        }
        ctx.emit_event(GameEvent::new(
            game_events::PITCH,
            self.pitch.margin(),
            self.pitch.goal_width(),
            self.pitch.goal_depth(),
        ));
        log::info!("Match ready: side {} to move", self.state.current_side());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, .. } if kind == events::RESET => {
                    self.reset_match(ctx);
                }
                InputEvent::KeyDown { key_code } if key_code == KEY_RESET => {
                    self.reset_match(ctx);
                }
                InputEvent::PointerDown { x, y } => {
                    self.aim
                        .pointer_down(ctx, &self.registry, &self.state, Vec2::new(x, y));
                }
                InputEvent::PointerMove { x, y } => {
                    self.aim.pointer_move(Vec2::new(x, y));
                }
                InputEvent::PointerUp { x, y } => {
                    self.aim
                        .pointer_up(ctx, &self.registry, &mut self.state, Vec2::new(x, y));
                }
                _ => {}
            }
        }
    }

    fn after_step(&mut self, ctx: &mut EngineContext) {
        let scored = self
            .registry
            .ball()
            .and_then(|ball| ctx.position(ball))
            .and_then(|pos| detect_goal(&self.pitch, pos));

        if let Some(scorer) = scored {
            self.handle_goal(ctx, scorer);
        } else if self.state.waiting_for_settle() {
            let stopped = self.registry.all_stopped(ctx, self.config.stop_eps);
            if self.state.on_settle_check(stopped) {
                log::info!("Table settled, side {} to move", self.state.current_side());
            }
        }
    }

    fn present(&self, ctx: &mut EngineContext) {
        self.emit_hud(ctx);
    }
}
