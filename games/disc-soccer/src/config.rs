//! Match tuning: pitch dimensions, body sizes, flick and settle thresholds.
//!
//! All values may be overridden from JSON; missing fields fall back to the
//! defaults below. Velocities are in world units per physics tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::goal::GOAL_LINE_OFFSET;
use crate::pitch::{POST_INSET, POST_THICKNESS};
use crate::side::Side;

/// Flick caps outside this band make turns either crawl or tunnel.
pub const MAX_FLICK_RANGE: (f32, f32) = (12.0, 24.0);

/// Why a configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed match config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("goal width {goal_width} must be smaller than the playable width {playable_width}")]
    GoalTooWide { goal_width: f32, playable_width: f32 },

    #[error("goal width {goal_width} cannot fit a ball of radius {ball_radius}")]
    GoalTooNarrow { goal_width: f32, ball_radius: f32 },

    #[error("goal depth {goal_depth} is too shallow for a ball of radius {ball_radius}")]
    GoalTooShallow { goal_depth: f32, ball_radius: f32 },

    #[error("air friction must be in [0, 1), got {0}")]
    AirFriction(f32),

    #[error("`{field}` must lie in [{min}, {max}], got {value}")]
    OutOfRange { field: &'static str, value: f32, min: f32, max: f32 },

    #[error("team row offset {offset} must lie in ({min}, {max})")]
    TeamRow { offset: f32, min: f32, max: f32 },

    #[error("team spacing {spacing} must lie in [{min}, {max}]")]
    TeamSpacing { spacing: f32, min: f32, max: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pitch width in world units.
    pub width: f32,
    /// Pitch height in world units. Side A defends the bottom edge.
    pub height: f32,
    /// Distance from the world edge to the playable area.
    pub margin: f32,
    /// Thickness of the boundary walls.
    pub wall_thickness: f32,
    /// Width of the centered goal gap at each end.
    pub goal_width: f32,
    /// How far the goal mouth extends behind the goal line.
    pub goal_depth: f32,
    pub disc_radius: f32,
    pub ball_radius: f32,
    /// Horizontal distance between neighbouring discs of a team.
    pub team_spacing: f32,
    /// Distance from a team's own goal line to its disc row.
    pub team_row_offset: f32,
    /// Largest flick speed, units per tick.
    pub max_flick: f32,
    /// A body slower than this (units per tick) counts as stopped.
    pub stop_eps: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Fraction of velocity lost to air drag each tick.
    pub air_friction: f32,
    /// Physics ticks per second.
    pub tick_hz: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 900.0,
            margin: 48.0,
            wall_thickness: 40.0,
            goal_width: 160.0,
            goal_depth: 36.0,
            disc_radius: 24.0,
            ball_radius: 14.0,
            team_spacing: 140.0,
            team_row_offset: 220.0,
            max_flick: 18.0,
            stop_eps: 0.03,
            restitution: 0.92,
            friction: 0.01,
            air_friction: 0.035,
            tick_hz: 120.0,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the geometric and numeric preconditions once, at setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
            ("wall_thickness", self.wall_thickness),
            ("goal_width", self.goal_width),
            ("goal_depth", self.goal_depth),
            ("disc_radius", self.disc_radius),
            ("ball_radius", self.ball_radius),
            ("team_spacing", self.team_spacing),
            ("team_row_offset", self.team_row_offset),
            ("max_flick", self.max_flick),
            ("stop_eps", self.stop_eps),
            ("tick_hz", self.tick_hz),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let playable_width = self.width - 2.0 * self.margin;
        if self.goal_width >= playable_width {
            return Err(ConfigError::GoalTooWide {
                goal_width: self.goal_width,
                playable_width,
            });
        }
        if self.goal_width <= 2.0 * self.ball_radius {
            return Err(ConfigError::GoalTooNarrow {
                goal_width: self.goal_width,
                ball_radius: self.ball_radius,
            });
        }
        if self.goal_depth <= self.ball_radius - GOAL_LINE_OFFSET {
            return Err(ConfigError::GoalTooShallow {
                goal_depth: self.goal_depth,
                ball_radius: self.ball_radius,
            });
        }
        if !(0.0..1.0).contains(&self.air_friction) {
            return Err(ConfigError::AirFriction(self.air_friction));
        }
        let (flick_min, flick_max) = MAX_FLICK_RANGE;
        for (field, value, min, max) in [
            ("max_flick", self.max_flick, flick_min, flick_max),
            ("restitution", self.restitution, 0.0, 1.0),
            ("friction", self.friction, 0.0, 1.0),
        ] {
            // NaN fails the range check too.
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value, min, max });
            }
        }

        // Discs start clear of the goal posts and of the ball on the center spot.
        let row_min = POST_INSET + POST_THICKNESS / 2.0 + self.disc_radius;
        let row_max = self.height / 2.0 - self.margin - self.ball_radius - self.disc_radius;
        if self.team_row_offset <= row_min || self.team_row_offset >= row_max {
            return Err(ConfigError::TeamRow {
                offset: self.team_row_offset,
                min: row_min,
                max: row_max,
            });
        }

        let spacing_min = 2.0 * self.disc_radius;
        let spacing_max = playable_width / 2.0 - self.disc_radius;
        if self.team_spacing < spacing_min || self.team_spacing > spacing_max {
            return Err(ConfigError::TeamSpacing {
                spacing: self.team_spacing,
                min: spacing_min,
                max: spacing_max,
            });
        }

        Ok(())
    }

    /// Seconds per physics tick.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Rapier's continuous damping coefficient equivalent to losing
    /// `air_friction` of the velocity every tick.
    pub fn linear_damping(&self) -> f32 {
        self.tick_hz * (1.0 / (1.0 - self.air_friction) - 1.0)
    }

    /// Y coordinate of a team's disc row.
    pub fn team_base_y(&self, side: Side) -> f32 {
        match side {
            Side::A => self.height - self.margin - self.team_row_offset,
            Side::B => self.margin + self.team_row_offset,
        }
    }
}
