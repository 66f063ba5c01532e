use flick_engine::{
    build_instances, events_as_floats, instances_as_floats, BodyInstance, EngineContext,
    FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. Native tests drive the same runner headless.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    instances: Vec<BodyInstance>,
    config: GameConfig,
    initialized: bool,
    tick_count: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let ctx = EngineContext::from_config(&config);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            timestep,
            instances: Vec::with_capacity(config.max_instances),
            config,
            initialized: false,
            tick_count: 0,
        }
    }

    /// Initialize the game. Call once after construction. The buffers
    /// already describe the starting table when this returns.
    pub fn init(&mut self) {
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.finish_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: as many fixed ticks as `dt` covers, then `present`.
    /// Returns the number of ticks run, possibly zero.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.run_tick();
        }
        self.finish_frame();
        steps
    }

    /// Run a frame of exactly one fixed tick, ignoring wall time.
    /// Pending input is consumed by this tick.
    pub fn step(&mut self) {
        if !self.initialized {
            return;
        }
        self.ctx.clear_frame_data();
        self.run_tick();
        self.finish_frame();
    }

    /// update (input) → physics → after_step.
    fn run_tick(&mut self) {
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        #[cfg(feature = "physics")]
        self.ctx.step_physics();
        self.game.after_step(&mut self.ctx);
        self.tick_count += 1;
    }

    fn finish_frame(&mut self) {
        self.game.present(&mut self.ctx);
        build_instances(self.ctx.scene.iter(), &mut self.instances);
    }

    // ---- Accessors ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    /// Fixed ticks run since init.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Interpolation alpha between the last tick and the next one.
    pub fn interpolation_alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    // ---- Pointer accessors for the host ----

    pub fn game_events_ptr(&self) -> *const f32 {
        events_as_floats(&self.ctx.events).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    /// Drawable bodies as of the end of the last frame.
    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        instances_as_floats(&self.instances).as_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_engine::{Entity, GameEvent, Visual};
    use glam::Vec2;

    const PRESENT: f32 = 9.0;

    /// Records the order hooks are called in.
    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        pointer_downs: usize,
    }

    impl Game for Recorder {
        fn config(&self) -> GameConfig {
            GameConfig { fixed_dt: 1.0 / 120.0, world_width: 300.0, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_pos(Vec2::new(10.0, 20.0))
                    .with_visual(Visual::new(1.0, 5.0)),
            );
            self.log.push("init");
        }

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue) {
            self.pointer_downs += input
                .iter()
                .filter(|e| matches!(e, InputEvent::PointerDown { .. }))
                .count();
            self.log.push("update");
        }

        fn after_step(&mut self, ctx: &mut EngineContext) {
            ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
            self.log.push("after_step");
        }

        fn present(&self, ctx: &mut EngineContext) {
            ctx.emit_event(GameEvent::new(PRESENT, self.log.len() as f32, 0.0, 0.0));
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Recorder::default());
        assert_eq!(runner.tick(1.0), 0);
        assert!(runner.game().log.is_empty());
    }

    #[test]
    fn hooks_run_in_tick_order() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.step();
        assert_eq!(runner.game().log, vec!["init", "update", "after_step"]);
        assert_eq!(runner.tick_count(), 1);
    }

    #[test]
    fn input_is_consumed_exactly_once_per_frame() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        let steps = runner.tick(4.0 / 120.0 + 1e-4);
        assert_eq!(steps, 4);
        assert_eq!(runner.game().pointer_downs, 1);
    }

    #[test]
    fn input_waits_for_a_frame_that_runs_a_tick() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        assert_eq!(runner.tick(0.001), 0);
        assert_eq!(runner.game().pointer_downs, 0);
        runner.tick(1.0 / 120.0);
        assert_eq!(runner.game().pointer_downs, 1);
    }

    fn kinds(runner: &GameRunner<Recorder>) -> Vec<f32> {
        runner.context().events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn events_are_per_frame() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        assert_eq!(kinds(&runner), vec![PRESENT]);
        runner.tick(2.0 / 120.0 + 1e-4);
        assert_eq!(kinds(&runner), vec![1.0, 1.0, PRESENT]);
        runner.tick(1.0 / 120.0 + 1e-4);
        assert_eq!(kinds(&runner), vec![1.0, PRESENT]);
        assert_eq!(runner.world_width(), 300.0);
    }

    #[test]
    fn frame_without_a_tick_still_presents() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        assert_eq!(runner.tick(1.0 / 120.0 + 1e-4), 1);

        // Faster than the tick rate: no tick this frame.
        assert_eq!(runner.tick(1.0 / 144.0), 0);
        assert_eq!(kinds(&runner), vec![PRESENT]);
        assert_eq!(runner.game_events_len(), 1);
        assert_eq!(runner.instance_count(), 1);
    }

    #[test]
    fn step_starts_a_new_frame() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        for _ in 0..50 {
            runner.step();
        }
        assert_eq!(kinds(&runner), vec![1.0, PRESENT]);
        assert_eq!(runner.tick_count(), 50);
    }

    #[test]
    fn instances_mirror_visible_entities() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        let instances = runner.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!((instances[0].x, instances[0].y, instances[0].radius), (10.0, 20.0, 5.0));
        assert_eq!(instances[0].id, 1.0);
        assert_eq!(runner.max_instances(), 32);
    }
}
