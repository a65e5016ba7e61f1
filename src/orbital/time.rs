//! Simulation clock
//!
//! Time is a Julian Date advanced on a fixed wall-clock tick. The tick period is the sample
//! interval; each tick moves the simulated time forward by `interval / 86400 * speed` days.
//! An interval of zero is the paused state.

use std::time::Duration;

use anyhow::ensure;
use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::core::sidereal::{SECONDS_PER_DAY, julian_date_utc, utc_from_julian_date};

/// Speed multipliers offered by the control surface.
pub const SPEED_PRESETS: [f64; 4] = [1.0, 100.0, 1_000.0, 100_000.0];

/// Shortest running tick period. Anything shorter would round the wall-clock timer to zero.
pub const MIN_SAMPLE_INTERVAL_SECS: f64 = 0.001;

/// Interval restored when resuming a clock that was never running.
pub const DEFAULT_RESUME_INTERVAL_SECS: f64 = 0.01;

/// Simulation time resource
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationClock {
    current_jd: f64,
    sample_interval_secs: f64,
    speed_multiplier: f64,
    /// Interval in effect before the last pause.
    resume_interval_secs: Option<f64>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            current_jd: julian_date_utc(Utc::now()),
            sample_interval_secs: 1.0,
            speed_multiplier: 1.0,
            resume_interval_secs: None,
        }
    }
}

impl SimulationClock {
    /// Build a clock. Invalid interval or speed values fall back to 1 s and 1x.
    pub fn new(start_jd: f64, sample_interval_secs: f64, speed_multiplier: f64) -> Self {
        let mut clock = Self {
            current_jd: start_jd,
            sample_interval_secs: 1.0,
            speed_multiplier: 1.0,
            resume_interval_secs: None,
        };
        if let Err(err) = clock.set_sample_interval(sample_interval_secs) {
            warn!("{err:#}; using 1 s");
        }
        if let Err(err) = clock.set_speed_multiplier(speed_multiplier) {
            warn!("{err:#}; using 1x");
        }
        clock
    }

    pub fn current_jd(&self) -> f64 {
        self.current_jd
    }

    pub fn sample_interval_secs(&self) -> f64 {
        self.sample_interval_secs
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn is_paused(&self) -> bool {
        self.sample_interval_secs == 0.0
    }

    /// Simulated time as UTC, if representable.
    pub fn utc(&self) -> Option<DateTime<Utc>> {
        utc_from_julian_date(self.current_jd)
    }

    /// Days added by one tick at the current settings.
    pub fn step_days(&self) -> f64 {
        self.sample_interval_secs / SECONDS_PER_DAY * self.speed_multiplier
    }

    /// Advance by one tick. Returns false (and changes nothing) while paused.
    pub fn tick(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        self.current_jd += self.step_days();
        true
    }

    /// Whether `secs` is usable as a sample interval: zero (paused) or at least
    /// [`MIN_SAMPLE_INTERVAL_SECS`].
    pub fn is_valid_interval(secs: f64) -> bool {
        secs == 0.0 || (secs.is_finite() && secs >= MIN_SAMPLE_INTERVAL_SECS)
    }

    /// Set the tick period. Zero pauses the clock.
    pub fn set_sample_interval(&mut self, secs: f64) -> anyhow::Result<()> {
        ensure!(
            Self::is_valid_interval(secs),
            "sample interval must be 0 or a finite number of seconds >= {MIN_SAMPLE_INTERVAL_SECS}, got {secs}"
        );
        if secs == 0.0 && !self.is_paused() {
            self.resume_interval_secs = Some(self.sample_interval_secs);
        }
        self.sample_interval_secs = secs;
        Ok(())
    }

    pub fn set_speed_multiplier(&mut self, speed: f64) -> anyhow::Result<()> {
        ensure!(
            SPEED_PRESETS.contains(&speed),
            "speed multiplier {speed} is not one of {SPEED_PRESETS:?}"
        );
        self.speed_multiplier = speed;
        Ok(())
    }

    pub fn pause(&mut self) {
        if !self.is_paused() {
            self.resume_interval_secs = Some(self.sample_interval_secs);
            self.sample_interval_secs = 0.0;
        }
    }

    pub fn resume(&mut self) {
        if self.is_paused() {
            self.sample_interval_secs = self
                .resume_interval_secs
                .take()
                .unwrap_or(DEFAULT_RESUME_INTERVAL_SECS);
        }
    }

    /// Toggle pause and return the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.is_paused()
    }

    /// Jump to `jd`. Pause state and speed are left alone.
    pub fn reset_to(&mut self, jd: f64) {
        self.current_jd = jd;
    }

    pub fn reset_to_now(&mut self) {
        self.reset_to(julian_date_utc(Utc::now()));
    }
}

/// Wall-clock timer whose period follows the clock's sample interval.
#[derive(Resource, Debug)]
pub struct ClockTicker(pub Timer);

impl Default for ClockTicker {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

impl ClockTicker {
    /// Feed `delta` of real time and apply every tick that completed. Returns the tick count.
    ///
    /// A paused clock does not run the timer at all, so no ticks accumulate while paused.
    pub fn advance(&mut self, clock: &mut SimulationClock, delta: Duration) -> u32 {
        if clock.is_paused() {
            return 0;
        }
        let period = Duration::from_secs_f64(clock.sample_interval_secs());
        if self.0.duration() != period {
            self.0.set_duration(period);
        }
        self.0.tick(delta);
        let ticks = self.0.times_finished_this_tick();
        for _ in 0..ticks {
            clock.tick();
        }
        ticks
    }
}

/// System to advance the simulation clock from real frame time
pub fn drive_simulation_clock(
    time: Res<Time>,
    mut ticker: ResMut<ClockTicker>,
    mut clock: ResMut<SimulationClock>,
) {
    if clock.is_paused() {
        return;
    }
    // Only flag the clock as changed when a tick actually landed
    let mut next = clock.clone();
    if ticker.advance(&mut next, time.delta()) > 0 {
        *clock = next;
    }
}
