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

//! # slate-soft
//!
//! The software reference backend for the `slate-hal` graphics contracts.
//!
//! [`SoftBackend`] implements every contract trait without touching a GPU:
//! resources live in CPU memory, the command surface records and validates
//! the command stream, and timers measure wall-clock time with a
//! configurable result latency so both the continuous and lagging timer
//! models of real backends can be exercised. Contract violations (draws
//! outside a frame, missing binds, stale uniform handles, mismatched input
//! layouts) fail fast with a descriptive panic instead of the undefined
//! behavior a production backend is permitted.
//!
//! That makes this crate three things: the software-fallback variant of the
//! contract, the executable documentation of its caller obligations, and
//! the test harness every property of the contract is verified against.
//!
//! Like the contract itself, the backend is strictly single-threaded: the
//! backend object and every handle it creates share one context via
//! `Rc<RefCell<_>>` and must stay on the thread that created them.

#![warn(missing_docs)]

mod backend;
mod context;
mod resources;
mod timer;

pub use self::backend::{SoftBackend, SoftOptions};
pub use self::context::{DrawRecord, FrameStats, PipelineState};
pub use self::resources::{SoftBuffer, SoftTexture};
