// Copyright 2025 the slate developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wall-clock timers with a configurable result latency.
//!
//! With a latency of zero frames the backend behaves like one whose timer
//! results are continuously available; with a latency of N frames the
//! result of a span ended in frame F only lands once frame F + N has
//! completed, which is how timer queries behave on deferred GPU pipelines.

use crate::context::SoftContext;
use slate_hal::traits::GpuTimer;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

enum TimerState {
    Idle,
    Begun(Instant),
    Ended { elapsed: Duration, end_frame: u64 },
}

/// A timer handle of the software backend.
pub struct SoftTimer {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) state: TimerState,
}

impl SoftTimer {
    pub(crate) fn new(ctx: Rc<RefCell<SoftContext>>) -> Self {
        Self {
            ctx,
            state: TimerState::Idle,
        }
    }
}

impl GpuTimer for SoftTimer {
    fn begin(&mut self) {
        self.state = TimerState::Begun(Instant::now());
    }

    fn end(&mut self) {
        let started = match self.state {
            TimerState::Begun(started) => started,
            _ => panic!("timer ended without a matching begin"),
        };
        // Clamp to a nonzero span so an available result is never mistaken
        // for a missing one by callers comparing against zero.
        let elapsed = started.elapsed().max(Duration::from_nanos(1));
        self.state = TimerState::Ended {
            elapsed,
            end_frame: self.ctx.borrow().frame_index,
        };
    }

    fn duration(&mut self) -> Option<Duration> {
        let ctx = self.ctx.borrow();
        match self.state {
            TimerState::Idle | TimerState::Begun(_) => None,
            TimerState::Ended { elapsed, end_frame } => {
                if ctx.frame_index >= end_frame + ctx.timer_latency_frames {
                    Some(elapsed)
                } else {
                    None
                }
            }
        }
    }

    fn release(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use crate::{SoftBackend, SoftOptions};
    use slate_hal::traits::GraphicsBackend;

    #[test]
    fn continuous_timer_resolves_immediately() {
        let mut b = SoftBackend::new(SoftOptions::default());
        assert!(b.is_time_continuous());
        let mut timer = b.create_timer();
        timer.begin();
        timer.end();
        let first = timer.duration().expect("result available");
        assert!(first > std::time::Duration::ZERO);
        // Idempotent until reused.
        assert_eq!(timer.duration(), Some(first));
        timer.release();
    }

    #[test]
    fn lagging_timer_needs_a_later_frame() {
        let options = SoftOptions {
            timer_latency_frames: 2,
            ..SoftOptions::default()
        };
        let mut b = SoftBackend::new(options);
        assert!(!b.is_time_continuous());

        let mut timer = b.create_timer();
        b.begin_frame();
        timer.begin();
        timer.end();
        b.end_frame();
        assert_eq!(timer.duration(), None);

        b.begin_frame();
        b.end_frame();
        assert!(timer.duration().is_some());
        timer.release();
    }

    #[test]
    fn reuse_discards_the_previous_result() {
        let mut b = SoftBackend::new(SoftOptions::default());
        let mut timer = b.create_timer();
        timer.begin();
        timer.end();
        assert!(timer.duration().is_some());
        timer.begin();
        assert_eq!(timer.duration(), None);
        timer.end();
        assert!(timer.duration().is_some());
        timer.release();
    }
}
