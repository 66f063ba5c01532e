//! Browser glue for flick-engine games.
//!
//! [`GameRunner`] owns a game and its engine context and drives the fixed
//! tick; [`export_game!`] wraps one runner in `#[wasm_bindgen]` free
//! functions the host page calls every animation frame. After each
//! `game_tick` the host reads two flat buffers: game events and body
//! instances.

pub mod runner;

pub use runner::GameRunner;

/// Crates the generated exports reach through `$crate`, so games only need
/// `wasm-bindgen` and `flick-web` in their own manifest.
#[doc(hidden)]
pub mod __private {
    pub use console_error_panic_hook;
    pub use console_log;
    pub use flick_engine::InputEvent;
    pub use log;
}

/// Export a game to the host page.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// flick_web::export_game!(DiscSoccer, "disc-soccer");
/// ```
///
/// `$game_type` implements `flick_engine::Game` and has a `new()`
/// constructor. `$game_name` only appears in log lines.
///
/// The runner lives in a `thread_local!`; calls made before `game_init`
/// log a warning and return a zero value.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        thread_local! {
            static RUNNER: ::std::cell::RefCell<Option<$crate::GameRunner<$game_type>>> =
                ::std::cell::RefCell::new(None);
        }

        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    $crate::__private::log::warn!("{}: called before game_init()", $game_name);
                    R::default()
                }
            })
        }

        fn push(event: $crate::__private::InputEvent) {
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            $crate::__private::console_error_panic_hook::set_once();
            // A second init (page hot reload) finds the logger already set.
            let _ = $crate::__private::console_log::init_with_level(
                $crate::__private::log::Level::Info,
            );

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            runner.init();
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            $crate::__private::log::info!("{}: initialized", $game_name);
        }

        /// Advance by `dt` seconds of wall time. Returns the ticks run.
        #[wasm_bindgen]
        pub fn game_tick(dt: f32) -> u32 {
            with_runner(|r| r.tick(dt))
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            push($crate::__private::InputEvent::PointerDown { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            push($crate::__private::InputEvent::PointerMove { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            push($crate::__private::InputEvent::PointerUp { x, y });
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            push($crate::__private::InputEvent::KeyDown { key_code });
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            push($crate::__private::InputEvent::KeyUp { key_code });
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            push($crate::__private::InputEvent::Custom { kind, a, b, c });
        }

        /// Start of this frame's events, `GameEvent::FLOATS` floats each.
        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(::std::ptr::null(), |r| r.game_events_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        /// Start of this frame's drawable bodies, `BodyInstance::FLOATS` floats each.
        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(::std::ptr::null(), |r| r.instances_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        #[wasm_bindgen]
        pub fn get_interpolation_alpha() -> f32 {
            with_runner(|r| r.interpolation_alpha())
        }
    };
}
