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

//! Shader source bundles, uniform/input descriptors and the opaque uniform
//! handle.

use std::borrow::Cow;

/// The programmable pipeline stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex shader stage.
    Vertex,
    /// The fragment (or pixel) shader stage.
    Fragment,
}

/// The scalar element type of a uniform or vertex input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// A 32-bit float.
    Float,
    /// A 16-bit signed integer.
    Short,
}

/// A bundle of shader source forms consumed by a backend.
///
/// The bundle carries the same shader in two dialects: a textual GLSL form
/// and a compiled HLSL byte-code form. A concrete backend picks whichever it
/// understands. The uniform and input descriptor lists describe the shader's
/// interface and must be identical regardless of which dialect the backend
/// consumes, so that layout negotiation is dialect-agnostic.
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    /// The textual GLSL source.
    pub glsl: Cow<'static, str>,
    /// The compiled HLSL byte-code.
    pub hlsl: Cow<'static, [u8]>,
    /// The shader's named uniforms, in declaration order.
    pub uniforms: Vec<UniformDesc>,
    /// The shader's per-vertex inputs, in declaration order.
    pub inputs: Vec<InputLocation>,
}

/// Describes one named uniform within a [`ShaderSources`] bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDesc {
    /// The uniform's name as declared in the shader.
    pub name: Cow<'static, str>,
    /// The element type.
    pub data_type: DataType,
    /// The number of elements (1 for a scalar, 4 for a vec4, ...).
    pub size: usize,
    /// The byte offset of the uniform within its block.
    pub offset: usize,
}

/// Describes one per-vertex input within a [`ShaderSources`] bundle.
///
/// GLSL identifies inputs by name and location index; HLSL identifies them
/// by semantic name and semantic index. Both identities are carried so the
/// descriptor list can serve either dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLocation {
    /// The input's name, for GLSL.
    pub name: Cow<'static, str>,
    /// The input's location index, for GLSL.
    pub location: u32,
    /// The input's semantic name, for HLSL.
    pub semantic: Cow<'static, str>,
    /// The input's semantic index, for HLSL.
    pub semantic_index: u32,
    /// The element type.
    pub data_type: DataType,
    /// The number of elements.
    pub size: usize,
}

/// Describes a vertex attribute as laid out in a buffer.
///
/// A slice of these builds an [`InputLayout`](crate::traits::InputLayout)
/// independently of the shader's own input list; the two must agree in
/// element type and count per slot, or building the layout fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDesc {
    /// The element type of the attribute.
    pub data_type: DataType,
    /// The number of elements.
    pub size: usize,
    /// The byte offset of the attribute within the buffer's stride.
    pub offset: usize,
}

/// An opaque handle to a named uniform, resolved from a
/// [`Program`](crate::traits::Program).
///
/// The handle is an index/generation pair rather than a bare index so that
/// a stale handle (one resolved from a program that has since been
/// released) is detectable by the backend instead of silently addressing
/// the wrong slot. Handles are only meaningful to the program that resolved
/// them; passing a handle to any other program is a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uniform {
    /// The uniform's slot index within the program. Backend-defined.
    pub index: u32,
    /// The generation of the program that resolved this handle.
    /// Backend-defined.
    pub generation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn shader_sources_default_is_empty() {
        let sources = ShaderSources::default();
        assert!(sources.glsl.is_empty());
        assert!(sources.hlsl.is_empty());
        assert!(sources.uniforms.is_empty());
        assert!(sources.inputs.is_empty());
    }

    #[test]
    fn uniform_handles_compare_by_index_and_generation() {
        let a = Uniform {
            index: 1,
            generation: 7,
        };
        let same = Uniform {
            index: 1,
            generation: 7,
        };
        let stale = Uniform {
            index: 1,
            generation: 6,
        };
        assert_eq!(a, same);
        assert_ne!(a, stale);
    }

    #[test]
    fn input_location_carries_both_dialect_identities() {
        let input = InputLocation {
            name: Cow::Borrowed("pos"),
            location: 0,
            semantic: Cow::Borrowed("POSITION"),
            semantic_index: 0,
            data_type: DataType::Float,
            size: 2,
        };
        assert_eq!(input.name, "pos");
        assert_eq!(input.semantic, "POSITION");
        assert_eq!(input.size, 2);
    }
}
