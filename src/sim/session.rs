//! Session lifecycle: tick loop, fire cooldown, game over and restart
//!
//! A `Session` owns the lane, the counters, the spawn RNG and its timers.
//! Every handler builds the complete next `SessionState` and swaps it in
//! before returning, so handlers never observe a half-applied update.
//!
//! Commands (`fire`, `restart`) act at the scheduler's current time; drivers
//! should call `advance_clock` with the latest time before issuing them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::lane::{Cell, Grid};
use super::schedule::{Millis, Scheduler, TaskHandle};
use super::state::{Phase, SessionEvent, SessionSnapshot, SessionState};
use super::tick::advance;
use crate::consts::WIDTH;
use crate::settings::Settings;

/// Timers a session schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Tick,
    FireCooldown,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    spawn_chance: f64,
    seed: u64,
    rng: Pcg32,
    state: SessionState,
    timers: Scheduler<Timer>,
    tick_task: Option<TaskHandle>,
    /// Cooldown armed by the latest effective fire in this run
    cooldown_task: Option<TaskHandle>,
}

impl Session {
    /// New session on an empty lane
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_grid(settings, seed, Grid::empty())
    }

    /// New session resuming a shared lane
    pub fn with_grid(settings: Settings, seed: u64, grid: Grid) -> Self {
        let spawn_chance = if settings.spawn_chance.is_finite() {
            settings.spawn_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            settings,
            spawn_chance,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: SessionState::new(grid),
            timers: Scheduler::new(),
            tick_task: None,
            cooldown_task: None,
        }
    }

    /// Arm the tick loop. No-op if already running or over.
    pub fn start(&mut self) {
        if self.tick_task.is_some() || self.state.is_over() {
            return;
        }
        self.tick_task = Some(self.timers.every(self.settings.tick_period_ms, Timer::Tick));
        log::info!(
            "Session started (seed {}, tick every {} ms)",
            self.seed,
            self.settings.tick_period_ms
        );
    }

    /// Whether the tick loop is armed
    pub fn is_running(&self) -> bool {
        self.tick_task.is_some()
    }

    /// Cancel every timer. A cooldown cut short here leaves fire available,
    /// so the session can be started again afterwards.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.tick_task = None;
        self.cooldown_task = None;
        self.state = SessionState {
            can_fire: true,
            ..self.state.clone()
        };
        log::info!("Session torn down at {} ms", self.timers.now());
    }

    /// Run every timer due up to `now`, in due order
    pub fn advance_clock(&mut self, now: Millis) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some((handle, timer)) = self.timers.pop_due(now) {
            match timer {
                Timer::Tick => events.extend(self.tick()),
                Timer::FireCooldown => events.extend(self.cooldown_elapsed(handle)),
            }
        }
        self.timers.settle(now);
        events
    }

    /// Run `ticks` tick periods of scheduler time with no input
    pub fn run_for(&mut self, ticks: u64) -> Vec<SessionEvent> {
        self.start();
        let span = ticks.saturating_mul(self.settings.tick_period_ms.max(1));
        let until = self.timers.now().saturating_add(span);
        self.advance_clock(until)
    }

    /// One simulation step: advance the lane, apply counters, maybe spawn,
    /// then latch game over. Inert once the session is over.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if self.state.is_over() {
            return Vec::new();
        }

        let mut events = Vec::new();
        let mut next = self.state.clone();
        let step = advance(&next.grid);

        next.grid = step.grid;
        next.score += step.score_delta;
        next.ticks += 1;
        for cell in step.impacts {
            log::debug!("Hit at cell {cell}");
            events.push(SessionEvent::Hit { cell });
        }
        for _ in 0..step.miss_delta {
            next.misses += 1;
            log::debug!("Snowman reached the base ({} misses)", next.misses);
            events.push(SessionEvent::Missed {
                misses: next.misses,
            });
        }

        // Roll every tick so the spawn sequence depends only on the seed
        let roll = self.rng.random_bool(self.spawn_chance);
        if roll && next.grid.place_if_empty(WIDTH - 1, Cell::Adversary) {
            log::debug!("Snowman spawned");
            events.push(SessionEvent::Spawned);
        }

        if next.misses >= self.settings.max_misses {
            next.phase = Phase::Over;
            if let Some(handle) = self.tick_task.take() {
                self.timers.cancel(handle);
            }
            log::info!("Game over: score {}, {} ticks", next.score, next.ticks);
            events.push(SessionEvent::GameOver { score: next.score });
        }

        self.state = next;
        events
    }

    /// Place a projectile at the base and start the cooldown. Ignored while
    /// over or cooling down; consumed even when the base cell is occupied.
    pub fn fire(&mut self) -> Vec<SessionEvent> {
        if self.state.is_over() || !self.state.can_fire {
            return Vec::new();
        }

        let mut next = self.state.clone();
        let placed = next.grid.place_if_empty(0, Cell::Projectile);
        next.can_fire = false;
        let cooldown = self
            .timers
            .after(self.settings.fire_cooldown_ms, Timer::FireCooldown);
        self.cooldown_task = Some(cooldown);
        self.state = next;

        if placed {
            vec![SessionEvent::Fired]
        } else {
            vec![SessionEvent::FireBlocked]
        }
    }

    /// Reset to a fresh empty session and re-arm the tick loop. Only
    /// accepted while over.
    pub fn restart(&mut self) -> Vec<SessionEvent> {
        if !self.state.is_over() {
            return Vec::new();
        }
        self.state = SessionState::default();
        // A cooldown still pending from the previous run no longer applies
        self.cooldown_task = None;
        self.start();
        log::info!("Session restarted");
        vec![SessionEvent::Restarted]
    }

    /// Cooldown expiry. Only the cooldown of the latest fire re-enables
    /// fire; one left over from before a restart does nothing.
    fn cooldown_elapsed(&mut self, handle: TaskHandle) -> Vec<SessionEvent> {
        if self.cooldown_task != Some(handle) {
            return Vec::new();
        }
        self.cooldown_task = None;
        if self.state.can_fire {
            return Vec::new();
        }
        self.state = SessionState {
            can_fire: true,
            ..self.state.clone()
        };
        vec![SessionEvent::CooldownElapsed]
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn misses(&self) -> u32 {
        self.state.misses
    }

    pub fn max_misses(&self) -> u32 {
        self.settings.max_misses
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn can_fire(&self) -> bool {
        self.state.can_fire
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scheduler clock reading
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// When the next timer is due, if any
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.state)
    }
}
