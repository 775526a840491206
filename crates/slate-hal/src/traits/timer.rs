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

use std::time::Duration;

/// GPU-side duration measurement scoped by explicit begin/end.
///
/// A timer moves through idle → begun → ended; after
/// [`end`](Self::end), the result is either available or still pending.
/// On backends where timer queries lag behind frame submission (advertised
/// via
/// [`GraphicsBackend::is_time_continuous`](crate::traits::GraphicsBackend::is_time_continuous)
/// returning `false`), the result typically lands only after a later frame
/// boundary.
pub trait GpuTimer {
    /// Starts the measured span. Reusing a timer with a new `begin`
    /// discards the previous result.
    fn begin(&mut self);

    /// Ends the measured span.
    fn end(&mut self);

    /// Returns the measured duration, or `None` while the result has not
    /// landed yet. Never blocks.
    ///
    /// Calling this before [`end`](Self::end) is a caller error. After
    /// `end`, repeated calls are idempotent and return the same value until
    /// the timer is reused via a new [`begin`](Self::begin).
    fn duration(&mut self) -> Option<Duration>;

    /// Releases the timer. Must be called exactly once.
    fn release(self: Box<Self>);
}
