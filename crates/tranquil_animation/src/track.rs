//! Animation tracks and their playback
//!
//! A [`Track`] is a list of steps (tweens, springs, value resets, callbacks)
//! that plays once per iteration. Odd iterations may play an alternate body,
//! which is how `alternate` directions and mirrored loops are expressed.
//!
//! Playback is driven by explicit `advance(dt_ms)` calls from the manager.
//! A single advance may cross several steps: zero-length steps and callbacks
//! complete without consuming time, so a zero-duration track finishes in the
//! same call that starts it.

use crate::config::{AnimationConfig, Direction, FillMode, Iterations};
use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};
use crate::value::AnimatedValue;
use smallvec::SmallVec;
use std::fmt;

/// One step of a track body
pub enum Step {
    /// Interpolate from the current value to `to`
    Tween {
        to: f32,
        duration_ms: f32,
        easing: Easing,
    },
    /// Spring toward `to` until settled
    Spring { to: f32, config: SpringConfig },
    /// Jump to a value
    Set(f32),
    /// Hold the current value
    Wait(f32),
    /// Run a callback (theme swaps at the midpoint of a transition)
    Call(Box<dyn FnMut()>),
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tween {
                to,
                duration_ms,
                easing,
            } => f
                .debug_struct("Tween")
                .field("to", to)
                .field("duration_ms", duration_ms)
                .field("easing", easing)
                .finish(),
            Step::Spring { to, config } => f
                .debug_struct("Spring")
                .field("to", to)
                .field("config", config)
                .finish(),
            Step::Set(v) => f.debug_tuple("Set").field(v).finish(),
            Step::Wait(ms) => f.debug_tuple("Wait").field(ms).finish(),
            Step::Call(_) => f.write_str("Call(..)"),
        }
    }
}

type Steps = SmallVec<[Step; 4]>;

/// A playable sequence of steps with repeat and fill behavior
#[derive(Debug, Default)]
pub struct Track {
    body: Steps,
    alternate_body: Option<Steps>,
    iterations: Iterations,
    delay_ms: f32,
    fill_mode: FillMode,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single tween from `from` to `to` honoring the config's direction,
    /// iteration count, delay and fill mode
    pub fn between(from: f32, to: f32, config: &AnimationConfig) -> Self {
        let duration = config.duration_ms as f32;
        let leg = |a: f32, b: f32| -> Steps {
            let mut steps = Steps::new();
            steps.push(Step::Set(a));
            steps.push(Step::Tween {
                to: b,
                duration_ms: duration,
                easing: config.easing,
            });
            steps
        };

        let (body, alternate_body) = match config.direction {
            Direction::Normal => (leg(from, to), None),
            Direction::Reverse => (leg(to, from), None),
            Direction::Alternate => (leg(from, to), Some(leg(to, from))),
            Direction::AlternateReverse => (leg(to, from), Some(leg(from, to))),
        };

        Self {
            body,
            alternate_body,
            iterations: config.iterations,
            delay_ms: config.delay_ms as f32,
            fill_mode: config.fill_mode,
        }
    }

    pub fn tween(mut self, to: f32, duration_ms: u32, easing: Easing) -> Self {
        self.body.push(Step::Tween {
            to,
            duration_ms: duration_ms as f32,
            easing,
        });
        self
    }

    pub fn spring(mut self, to: f32, config: SpringConfig) -> Self {
        self.body.push(Step::Spring { to, config });
        self
    }

    pub fn set(mut self, value: f32) -> Self {
        self.body.push(Step::Set(value));
        self
    }

    pub fn wait(mut self, duration_ms: u32) -> Self {
        self.body.push(Step::Wait(duration_ms as f32));
        self
    }

    pub fn call<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.body.push(Step::Call(Box::new(callback)));
        self
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms as f32;
        self
    }

    pub fn fill(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Total time of one pass through the body, ignoring springs
    pub fn body_duration_ms(&self) -> f32 {
        self.body
            .iter()
            .map(|step| match step {
                Step::Tween { duration_ms, .. } => *duration_ms,
                Step::Wait(ms) => *ms,
                _ => 0.0,
            })
            .sum()
    }

    pub fn is_infinite(&self) -> bool {
        self.iterations.is_infinite()
    }

    fn body_for(&mut self, iteration: u32) -> &mut Steps {
        match self.alternate_body.as_mut() {
            Some(alt) if iteration % 2 == 1 => alt,
            _ => &mut self.body,
        }
    }
}

/// Progress of a running track against its value
pub(crate) struct Playback {
    value: AnimatedValue,
    track: Track,
    step_index: usize,
    step_elapsed: f32,
    step_from: Option<f32>,
    spring: Option<Spring>,
    iteration: u32,
    iteration_elapsed: f32,
    origin: f32,
    delay_remaining: f32,
    started: bool,
    finished: bool,
}

impl Playback {
    pub(crate) fn new(value: AnimatedValue, track: Track) -> Self {
        let delay_remaining = track.delay_ms;
        let origin = value.get();
        Self {
            value,
            track,
            step_index: 0,
            step_elapsed: 0.0,
            step_from: None,
            spring: None,
            iteration: 0,
            iteration_elapsed: 0.0,
            origin,
            delay_remaining,
            started: false,
            finished: false,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn value(&self) -> &AnimatedValue {
        &self.value
    }

    fn next_step(&mut self) {
        self.step_index += 1;
        self.step_elapsed = 0.0;
        self.step_from = None;
        self.spring = None;
    }

    fn finish(&mut self) {
        if !self.track.fill_mode.holds_end() {
            self.value.set(self.origin);
        }
        self.finished = true;
    }

    /// Advance by `dt_ms`. Returns `true` once the track has finished.
    pub(crate) fn advance(&mut self, dt_ms: f32) -> bool {
        if self.finished {
            return true;
        }

        let mut budget = dt_ms.max(0.0);

        if self.delay_remaining > 0.0 {
            let consumed = budget.min(self.delay_remaining);
            self.delay_remaining -= consumed;
            budget -= consumed;
            if self.delay_remaining > 0.0 {
                return false;
            }
        }

        if !self.started {
            self.started = true;
            self.origin = self.value.get();
        }

        loop {
            let iteration = self.iteration;
            let body_len = self.track.body_for(iteration).len();

            if self.step_index >= body_len {
                let empty_pass = self.iteration_elapsed <= 0.0;
                self.iteration += 1;
                self.iteration_elapsed = 0.0;
                self.step_index = 0;

                if !self.track.iterations.allows(self.iteration) {
                    self.finish();
                    return true;
                }
                if empty_pass && self.track.is_infinite() {
                    tracing::trace!("zero-length infinite track; finishing");
                    self.finish();
                    return true;
                }
                continue;
            }

            let value = self.value.clone();
            let step_from = *self.step_from.get_or_insert_with(|| value.get());
            let step = &mut self.track.body_for(iteration)[self.step_index];

            match step {
                Step::Set(v) => {
                    value.set(*v);
                    self.next_step();
                }
                Step::Call(callback) => {
                    callback();
                    self.next_step();
                }
                Step::Wait(duration) => {
                    let remaining = *duration - self.step_elapsed;
                    if budget >= remaining {
                        budget -= remaining;
                        self.iteration_elapsed += remaining;
                        self.next_step();
                    } else {
                        self.step_elapsed += budget;
                        self.iteration_elapsed += budget;
                        return false;
                    }
                }
                Step::Tween {
                    to,
                    duration_ms,
                    easing,
                } => {
                    let (to, duration, easing) = (*to, *duration_ms, *easing);
                    let remaining = duration - self.step_elapsed;
                    if budget >= remaining {
                        value.set(to);
                        budget -= remaining;
                        self.iteration_elapsed += remaining;
                        self.next_step();
                    } else {
                        self.step_elapsed += budget;
                        self.iteration_elapsed += budget;
                        let eased = easing.apply(self.step_elapsed / duration);
                        value.set(step_from + (to - step_from) * eased);
                        return false;
                    }
                }
                Step::Spring { to, config } => {
                    let (to, config) = (*to, *config);
                    let spring = self.spring.get_or_insert_with(|| {
                        let mut spring = Spring::new(config, step_from);
                        spring.set_target(to);
                        spring
                    });
                    if budget > 0.0 {
                        spring.step(budget / 1000.0);
                        self.iteration_elapsed += budget;
                        budget = 0.0;
                    }
                    value.set(spring.value());
                    if spring.is_settled() {
                        self.next_step();
                    } else {
                        return false;
                    }
                }
            }
        }
    }

    /// Jump every remaining step to its end state. Callbacks still run.
    pub(crate) fn complete_now(&mut self) {
        // A single pass is enough; the remaining iterations would only repeat it.
        self.delay_remaining = 0.0;
        self.track.iterations = Iterations::count(self.iteration + 1);
        while !self.finished {
            let iteration = self.iteration;
            let index = self.step_index;
            let body = self.track.body_for(iteration);
            if let Some(step) = body.get_mut(index) {
                let replacement = match step {
                    Step::Tween { duration_ms, .. } | Step::Wait(duration_ms) => {
                        *duration_ms = 0.0;
                        None
                    }
                    Step::Spring { to, .. } => Some(Step::Set(*to)),
                    _ => None,
                };
                if let Some(replacement) = replacement {
                    *step = replacement;
                }
            }
            self.step_elapsed = 0.0;
            self.advance(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn tween_interpolates_linearly() {
        let value = AnimatedValue::new(0.0);
        let track = Track::new().tween(100.0, 100, Easing::Linear);
        let mut playback = Playback::new(value.clone(), track);

        assert!(!playback.advance(25.0));
        assert!(approx(value.get(), 25.0));
        assert!(!playback.advance(50.0));
        assert!(approx(value.get(), 75.0));
        assert!(playback.advance(50.0));
        assert_eq!(value.get(), 100.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let value = AnimatedValue::new(1.0);
        let mut playback = Playback::new(value.clone(), Track::new().tween(0.0, 0, Easing::Linear));
        assert!(playback.advance(0.0));
        assert_eq!(value.get(), 0.0);
    }

    #[test]
    fn callback_runs_between_steps() {
        let value = AnimatedValue::new(1.0);
        let observed = Rc::new(Cell::new(f32::NAN));
        let seen = observed.clone();
        let watched = value.clone();

        let track = Track::new()
            .tween(0.0, 100, Easing::Linear)
            .call(move || seen.set(watched.get()))
            .tween(1.0, 100, Easing::Linear);
        let mut playback = Playback::new(value.clone(), track);

        playback.advance(60.0);
        assert!(observed.get().is_nan());
        playback.advance(60.0);
        assert_eq!(observed.get(), 0.0);
        assert!(playback.advance(100.0));
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn delay_holds_before_start() {
        let value = AnimatedValue::new(0.0);
        let track = Track::new().tween(10.0, 100, Easing::Linear).delay(50);
        let mut playback = Playback::new(value.clone(), track);

        playback.advance(40.0);
        assert_eq!(value.get(), 0.0);
        playback.advance(60.0);
        assert!(approx(value.get(), 5.0));
    }

    #[test]
    fn counted_iterations_repeat_body() {
        let value = AnimatedValue::new(0.0);
        let config = AnimationConfig::new(100).with_iterations(Iterations::Count(3));
        let mut playback = Playback::new(value.clone(), Track::between(0.0, 1.0, &config));

        assert!(!playback.advance(150.0));
        assert!(approx(value.get(), 0.5));
        assert!(!playback.advance(100.0));
        assert!(playback.advance(100.0));
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn alternate_direction_mirrors_odd_iterations() {
        let value = AnimatedValue::new(0.0);
        let config = AnimationConfig::new(100)
            .with_iterations(Iterations::Count(2))
            .with_direction(Direction::Alternate);
        let mut playback = Playback::new(value.clone(), Track::between(0.0, 1.0, &config));

        playback.advance(100.0);
        playback.advance(25.0);
        assert!(approx(value.get(), 0.75));
        assert!(playback.advance(100.0));
        assert_eq!(value.get(), 0.0);
    }

    #[test]
    fn reverse_direction_plays_backwards() {
        let value = AnimatedValue::new(0.0);
        let config = AnimationConfig::new(100).with_direction(Direction::Reverse);
        let mut playback = Playback::new(value.clone(), Track::between(0.0, 1.0, &config));
        playback.advance(25.0);
        assert!(approx(value.get(), 0.75));
    }

    #[test]
    fn fill_none_restores_origin() {
        let value = AnimatedValue::new(0.3);
        let track = Track::new()
            .tween(1.0, 10, Easing::Linear)
            .fill(FillMode::None);
        let mut playback = Playback::new(value.clone(), track);
        assert!(playback.advance(20.0));
        assert_eq!(value.get(), 0.3);
    }

    #[test]
    fn zero_length_infinite_track_terminates() {
        let value = AnimatedValue::new(0.0);
        let track = Track::new()
            .tween(1.0, 0, Easing::Linear)
            .iterations(Iterations::Infinite);
        let mut playback = Playback::new(value.clone(), track);
        assert!(playback.advance(16.0));
    }

    #[test]
    fn spring_step_settles() {
        let value = AnimatedValue::new(0.0);
        let track = Track::new().spring(1.0, SpringConfig::snappy());
        let mut playback = Playback::new(value.clone(), track);
        let mut done = false;
        for _ in 0..240 {
            if playback.advance(16.0) {
                done = true;
                break;
            }
        }
        assert!(done);
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn complete_now_jumps_to_end_and_runs_callbacks() {
        let value = AnimatedValue::new(1.0);
        let called = Rc::new(Cell::new(0));
        let c = called.clone();
        let track = Track::new()
            .tween(0.0, 500, Easing::Linear)
            .call(move || c.set(c.get() + 1))
            .tween(1.0, 500, Easing::Linear)
            .iterations(Iterations::Infinite);
        let mut playback = Playback::new(value.clone(), track);
        playback.advance(100.0);

        playback.complete_now();
        assert!(playback.is_finished());
        assert_eq!(called.get(), 1);
        assert_eq!(value.get(), 1.0);
    }
}
