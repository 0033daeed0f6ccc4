use fam_engine::{EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, Renderer};

/// Generic game runner that wires up the engine loop.
///
/// The platform layer owns one of these, pushes input as it arrives and calls
/// [`frame`](GameRunner::frame) with the wall-clock delta of every rendered frame.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    paused: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            timestep: FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame),
            ctx: EngineContext::new(&config),
            game,
            input: InputQueue::new(),
            config,
            initialized: false,
            paused: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) -> Result<(), G::Error> {
        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        log::info!(
            "runner: initialized {}x{} world, dt={:.4}",
            self.config.world_width,
            self.config.world_height,
            self.config.fixed_dt
        );
        Ok(())
    }

    /// Push an input event. Held state (keys, cursor) updates immediately; the
    /// event itself is delivered to the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.ctx.input.apply(&event);
        self.input.push(event);
    }

    /// Run one rendered frame: as many fixed ticks as `frame_dt` pays for,
    /// then the game's draw pass. Returns the number of ticks run.
    pub fn frame(&mut self, frame_dt: f32, renderer: &mut dyn Renderer) -> u32 {
        if !self.initialized {
            return 0;
        }

        let steps = if self.paused {
            0
        } else {
            self.timestep.accumulate(frame_dt)
        };

        // Queued events go to the first tick only. With no tick this frame
        // they wait for the next one.
        for step in 0..steps {
            if step == 0 {
                self.game.update(&mut self.ctx, &self.input);
                self.input.drain();
            } else {
                self.game.update(&mut self.ctx, &InputQueue::new());
            }
        }

        self.game.draw(&self.ctx, renderer, self.timestep.alpha());
        steps
    }

    /// Stop ticking. Drawing continues, so the last state stays on screen.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused {
            self.timestep.reset();
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

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

    /// Game and context together, for driving the game from outside a tick.
    pub fn split_mut(&mut self) -> (&mut G, &mut EngineContext) {
        (&mut self.game, &mut self.ctx)
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
