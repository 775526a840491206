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

//! # slate-hal
//!
//! Backend-agnostic graphics contracts for the slate 2D rendering pipeline.
//!
//! This crate defines the "common language" between the renderer and a
//! concrete graphics backend (an OpenGL-, Direct3D- or software-style
//! implementation). It contains the abstract traits (like
//! [`GraphicsBackend`]), the resource vocabulary (enums, flags and
//! descriptors such as [`ShaderSources`]) and the error types that form the
//! stable contract every backend must honor identically, so that rendering
//! code written against this crate is fully portable across backends.
//!
//! The crate defines the 'what' of rendering; the 'how' lives in a concrete
//! backend crate (such as `slate-soft`, the software reference backend)
//! which implements these traits and is selected once at context-creation
//! time, never switched at call granularity.
//!
//! ## Threading
//!
//! The whole contract assumes a single-threaded cooperative model: every
//! backend, resource and command operation executes on one logical thread
//! (the rendering thread) with no internal locking. None of the traits
//! carry `Send`/`Sync` bounds; concurrent use is undefined behavior unless
//! a concrete backend documents otherwise.

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{FramebufferError, LayoutError, ShaderError};
pub use self::traits::{
    Buffer, Framebuffer, GpuTimer, GraphicsBackend, InputLayout, Program, Texture,
};
