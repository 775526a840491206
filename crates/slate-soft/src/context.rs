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

//! The shared context behind a [`SoftBackend`](crate::SoftBackend) and
//! every handle it creates.
//!
//! All binding state and every resource store is a field of this one
//! object, shared via `Rc<RefCell<_>>`: the context-global mutable state
//! the contract describes, made explicit so multiple backends stay
//! independent. Resource slots are never reused, which is what makes stale
//! handle detection reliable.

use slate_hal::api::{
    BlendFactor, BufferKind, Caps, ClearMask, CompareFunction, FilterMode, PrimitiveTopology,
    ShaderSources, TextureFormat, UniformDesc,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The slot index of the default (window) framebuffer sentinel.
pub(crate) const DEFAULT_FRAMEBUFFER: usize = 0;

/// The sentinel id of the nil texture. Not a store slot.
pub(crate) const NIL_TEXTURE: usize = usize::MAX;

/// The highest texture unit the backend accepts.
pub(crate) const MAX_TEXTURE_UNITS: usize = 32;

pub(crate) struct TextureEntry {
    #[allow(dead_code)]
    pub(crate) min_filter: FilterMode,
    #[allow(dead_code)]
    pub(crate) mag_filter: FilterMode,
    /// `None` until the first resize allocates storage.
    pub(crate) format: Option<TextureFormat>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// CPU shadow of the last uploaded RGBA pixels, zeroed on resize.
    pub(crate) pixels: Vec<u8>,
}

pub(crate) struct BufferEntry {
    pub(crate) kind: BufferKind,
    pub(crate) data: Vec<u8>,
}

pub(crate) struct FramebufferEntry {
    pub(crate) attachment: Option<usize>,
    pub(crate) is_default: bool,
}

pub(crate) enum UniformValue {
    Unset,
    I32(i32),
    F32(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
}

pub(crate) struct ProgramEntry {
    pub(crate) uniforms: Vec<UniformDesc>,
    pub(crate) values: Vec<UniformValue>,
    /// Distinguishes this program's uniform handles from every other
    /// program's, past and future.
    pub(crate) generation: u32,
    pub(crate) vertex_fingerprint: u64,
}

pub(crate) struct LayoutEntry {
    pub(crate) vertex_fingerprint: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VertexBinding {
    pub(crate) buffer: usize,
    #[allow(dead_code)]
    pub(crate) stride: usize,
    #[allow(dead_code)]
    pub(crate) offset: usize,
}

/// A snapshot of the persistent command-surface state.
///
/// Exposed for introspection so tests and tools can observe that state
/// setters persist, and that setting the same value twice leaves the state
/// indistinguishable from setting it once.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    /// Whether blending is enabled.
    pub blend_enabled: bool,
    /// The source blend factor.
    pub blend_src: BlendFactor,
    /// The destination blend factor.
    pub blend_dst: BlendFactor,
    /// Whether the depth test is enabled.
    pub depth_test: bool,
    /// The depth comparison function.
    pub depth_func: CompareFunction,
    /// Whether depth writes are enabled.
    pub depth_write: bool,
    /// The color written by a color clear.
    pub clear_color: [f32; 4],
    /// The depth written by a depth clear.
    pub clear_depth: f32,
    /// The active rasterization rectangle as `(x, y, width, height)`.
    pub viewport: (i32, i32, u32, u32),
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            blend_enabled: false,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::Zero,
            depth_test: false,
            depth_func: CompareFunction::Always,
            depth_write: true,
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            viewport: (0, 0, 0, 0),
        }
    }
}

/// Cumulative counters over the backend's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Completed frames.
    pub frames: u64,
    /// Draw calls issued.
    pub draw_calls: u64,
    /// Triangles submitted across all draw calls.
    pub triangles: u64,
    /// Clear commands issued.
    pub clears: u64,
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRecord {
    /// The primitive topology of the draw.
    pub topology: PrimitiveTopology,
    /// The first vertex or index.
    pub first: u32,
    /// The vertex or index count.
    pub count: u32,
    /// Whether the draw consumed the bound index buffer.
    pub indexed: bool,
    /// The number of triangles the draw describes.
    pub triangles: u64,
}

pub(crate) struct SoftContext {
    pub(crate) caps: Caps,
    pub(crate) timer_latency_frames: u64,

    pub(crate) textures: Vec<Option<TextureEntry>>,
    pub(crate) buffers: Vec<Option<BufferEntry>>,
    pub(crate) framebuffers: Vec<Option<FramebufferEntry>>,
    pub(crate) programs: Vec<Option<ProgramEntry>>,
    pub(crate) layouts: Vec<Option<LayoutEntry>>,
    next_program_generation: u32,

    pub(crate) frame_open: bool,
    pub(crate) frame_index: u64,

    pub(crate) bound_program: Option<usize>,
    pub(crate) bound_layout: Option<usize>,
    pub(crate) bound_framebuffer: usize,
    pub(crate) bound_vertex: Option<VertexBinding>,
    pub(crate) bound_index_buffer: Option<usize>,
    pub(crate) bound_data_buffer: Option<usize>,
    pub(crate) texture_units: [Option<usize>; MAX_TEXTURE_UNITS],

    pub(crate) state: PipelineState,
    pub(crate) stats: FrameStats,
    pub(crate) draws: Vec<DrawRecord>,
    pub(crate) last_clear: Option<ClearMask>,
}

impl SoftContext {
    pub(crate) fn new(caps: Caps, timer_latency_frames: u64) -> Self {
        Self {
            caps,
            timer_latency_frames,
            textures: Vec::new(),
            buffers: Vec::new(),
            framebuffers: vec![Some(FramebufferEntry {
                attachment: None,
                is_default: true,
            })],
            programs: Vec::new(),
            layouts: Vec::new(),
            next_program_generation: 1,
            frame_open: false,
            frame_index: 0,
            bound_program: None,
            bound_layout: None,
            bound_framebuffer: DEFAULT_FRAMEBUFFER,
            bound_vertex: None,
            bound_index_buffer: None,
            bound_data_buffer: None,
            texture_units: [None; MAX_TEXTURE_UNITS],
            state: PipelineState::default(),
            stats: FrameStats::default(),
            draws: Vec::new(),
            last_clear: None,
        }
    }

    pub(crate) fn assert_frame_open(&self, what: &str) {
        assert!(
            self.frame_open,
            "{what} issued outside a begin_frame/end_frame pair"
        );
    }

    pub(crate) fn next_generation(&mut self) -> u32 {
        let generation = self.next_program_generation;
        self.next_program_generation += 1;
        generation
    }

    // Store accessors. Indexing a vacated slot means the caller is holding
    // a handle to a released resource, which the reference backend reports
    // instead of ignoring.

    pub(crate) fn texture(&self, id: usize) -> &TextureEntry {
        self.textures[id]
            .as_ref()
            .expect("texture used after release")
    }

    pub(crate) fn texture_mut(&mut self, id: usize) -> &mut TextureEntry {
        self.textures[id]
            .as_mut()
            .expect("texture used after release")
    }

    pub(crate) fn buffer(&self, id: usize) -> &BufferEntry {
        self.buffers[id]
            .as_ref()
            .expect("buffer used after release")
    }

    pub(crate) fn framebuffer(&self, id: usize) -> &FramebufferEntry {
        self.framebuffers[id]
            .as_ref()
            .expect("framebuffer used after release")
    }

    pub(crate) fn framebuffer_mut(&mut self, id: usize) -> &mut FramebufferEntry {
        self.framebuffers[id]
            .as_mut()
            .expect("framebuffer used after release")
    }

    pub(crate) fn program(&self, id: usize) -> &ProgramEntry {
        self.programs[id]
            .as_ref()
            .expect("program used after release")
    }

    pub(crate) fn program_mut(&mut self, id: usize) -> &mut ProgramEntry {
        self.programs[id]
            .as_mut()
            .expect("program used after release")
    }

    pub(crate) fn layout(&self, id: usize) -> &LayoutEntry {
        self.layouts[id]
            .as_ref()
            .expect("input layout used after release")
    }
}

/// Identifies a shader source set so a layout and a program built from the
/// same sources can be matched at draw time.
pub(crate) fn shader_fingerprint(sources: &ShaderSources) -> u64 {
    let mut hasher = DefaultHasher::new();
    sources.glsl.hash(&mut hasher);
    sources.hlsl.hash(&mut hasher);
    hasher.finish()
}

/// The number of triangles a draw of `count` vertices describes.
pub(crate) fn triangle_count(topology: PrimitiveTopology, count: u32) -> u64 {
    match topology {
        PrimitiveTopology::TriangleList => u64::from(count / 3),
        PrimitiveTopology::TriangleStrip => u64::from(count.saturating_sub(2)),
    }
}
