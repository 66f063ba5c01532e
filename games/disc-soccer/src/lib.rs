//! Turn-based disc-flicking soccer on Rapier2D.
//!
//! Each side owns three discs and flicks them, one per turn, to knock the
//! ball through the opponent's goal gap. Turns alternate only after every
//! body on the table has come to rest.

pub mod aim;
pub mod config;
pub mod game;
pub mod goal;
pub mod pitch;
pub mod registry;
pub mod score;
pub mod side;
pub mod state;
pub mod turn;

pub use aim::{cap_flick, flick_from_drag, AimController, AimPreview, AimSession};
pub use config::{ConfigError, MatchConfig, MAX_FLICK_RANGE};
pub use game::{events, game_events, DiscSoccer, KEY_RESET};
pub use goal::{detect_goal, GOAL_LINE_OFFSET};
pub use pitch::Pitch;
pub use registry::{BodyKind, Registry, Roster, ROSTER_SIZE};
pub use score::Score;
pub use side::Side;
pub use state::MatchState;
pub use turn::{Phase, TurnState};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::DiscSoccer;

    flick_web::export_game!(DiscSoccer, "disc-soccer");
}
