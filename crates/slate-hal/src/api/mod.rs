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

//! Backend-agnostic vocabulary of the rendering contract.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`caps`]**: Capability negotiation (feature flags and limits).
//! - **[`buffer`]**: GPU buffer usage kinds.
//! - **[`texture`]**: Texture filters, formats and the CPU-side image type.
//! - **[`shader`]**: Shader source bundles, uniform/input descriptors and
//!   the opaque uniform handle.
//! - **[`state`]**: Command-surface state vocabulary (blend, depth, clear,
//!   topology).

pub mod buffer;
pub mod caps;
pub mod shader;
pub mod state;
pub mod texture;

pub use self::buffer::BufferKind;
pub use self::caps::{Caps, Features};
pub use self::shader::{
    DataType, InputDesc, InputLocation, ShaderSources, ShaderStage, Uniform, UniformDesc,
};
pub use self::state::{BlendFactor, ClearMask, CompareFunction, PrimitiveTopology};
pub use self::texture::{CpuImage, FilterMode, TextureFormat};
