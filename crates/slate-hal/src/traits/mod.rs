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

//! The core architectural traits of the rendering contract.
//!
//! These are the fundamental contracts that decouple rendering logic from
//! any specific graphics backend:
//!
//! - [`GraphicsBackend`]: the root object, combining resource factory,
//!   capability query and per-frame command surface.
//! - [`Texture`], [`Buffer`], [`Framebuffer`], [`InputLayout`]: opaque,
//!   backend-owned resource handles with explicit lifecycle.
//! - [`Program`]: a compiled vertex/fragment shader pair with named uniform
//!   slots.
//! - [`GpuTimer`]: GPU-side duration measurement.
//!
//! Each trait is implemented by one concrete variant per target graphics
//! API, selected once at context-creation time.

mod backend;
mod program;
mod resources;
mod timer;

pub use self::backend::GraphicsBackend;
pub use self::program::Program;
pub use self::resources::{Buffer, Framebuffer, InputLayout, Texture};
pub use self::timer::GpuTimer;
