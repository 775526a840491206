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

use crate::context::{
    shader_fingerprint, triangle_count, BufferEntry, DrawRecord, FrameStats, FramebufferEntry,
    LayoutEntry, PipelineState, ProgramEntry, SoftContext, TextureEntry, UniformValue,
    DEFAULT_FRAMEBUFFER, NIL_TEXTURE,
};
use crate::resources::{SoftBuffer, SoftFramebuffer, SoftInputLayout, SoftProgram, SoftTexture};
use crate::timer::SoftTimer;
use slate_hal::api::{
    BlendFactor, BufferKind, Caps, ClearMask, CompareFunction, Features, FilterMode,
    InputDesc, PrimitiveTopology, ShaderSources, UniformDesc,
};
use slate_hal::error::{LayoutError, ShaderError};
use slate_hal::traits::{
    Buffer, Framebuffer, GpuTimer, GraphicsBackend, InputLayout, Program, Texture,
};
use slate_hal::ShaderStage;
use std::cell::RefCell;
use std::rc::Rc;

/// Construction options for a [`SoftBackend`].
#[derive(Debug, Clone)]
pub struct SoftOptions {
    /// The feature set the backend advertises.
    pub features: Features,
    /// The largest texture edge the backend accepts.
    pub max_texture_size: u32,
    /// How many completed frames after `end` a timer result takes to land.
    /// Zero makes the backend time-continuous.
    pub timer_latency_frames: u64,
}

impl Default for SoftOptions {
    fn default() -> Self {
        Self {
            features: Features::TIMERS | Features::FLOAT_RENDER_TARGETS,
            max_texture_size: 8192,
            timer_latency_frames: 0,
        }
    }
}

/// The software implementation of [`GraphicsBackend`].
///
/// Resources are CPU-side records, draws are recorded rather than
/// rasterized, and every caller obligation of the contract is enforced
/// with a panic at the violating call. The recorded command stream and
/// the persistent pipeline state are available through
/// [`stats`](Self::stats), [`draws`](Self::draws) and
/// [`pipeline_state`](Self::pipeline_state).
pub struct SoftBackend {
    ctx: Rc<RefCell<SoftContext>>,
}

impl SoftBackend {
    /// Creates a backend with the given options.
    pub fn new(options: SoftOptions) -> Self {
        let caps = Caps {
            features: options.features,
            max_texture_size: options.max_texture_size,
        };
        log::debug!(
            "software backend up: features {:#x}, max texture size {}, timer latency {} frames",
            caps.features.bits(),
            caps.max_texture_size,
            options.timer_latency_frames
        );
        Self {
            ctx: Rc::new(RefCell::new(SoftContext::new(
                caps,
                options.timer_latency_frames,
            ))),
        }
    }

    /// Returns the cumulative frame and draw counters.
    pub fn stats(&self) -> FrameStats {
        self.ctx.borrow().stats
    }

    /// Returns a snapshot of the persistent pipeline state.
    pub fn pipeline_state(&self) -> PipelineState {
        self.ctx.borrow().state.clone()
    }

    /// Returns every draw call recorded so far, in submission order.
    pub fn draws(&self) -> Vec<DrawRecord> {
        self.ctx.borrow().draws.clone()
    }

    /// Merges the uniform descriptors of both stages, deduplicated by name.
    ///
    /// A name declared by both stages with a different type or size is a
    /// link failure.
    fn merge_uniforms(
        vertex: &ShaderSources,
        fragment: &ShaderSources,
    ) -> Result<Vec<UniformDesc>, ShaderError> {
        let mut merged: Vec<UniformDesc> = vertex.uniforms.clone();
        for desc in &fragment.uniforms {
            match merged.iter().find(|known| known.name == desc.name) {
                None => merged.push(desc.clone()),
                Some(known) if known.data_type == desc.data_type && known.size == desc.size => {}
                Some(known) => {
                    return Err(ShaderError::LinkFailed {
                        details: format!(
                            "uniform '{}' declared as {:?}x{} by the vertex stage but {:?}x{} by the fragment stage",
                            desc.name, known.data_type, known.size, desc.data_type, desc.size
                        ),
                    });
                }
            }
        }
        Ok(merged)
    }

    fn record_draw(&self, topology: PrimitiveTopology, indexed: bool, first: u32, count: u32) {
        let mut ctx = self.ctx.borrow_mut();
        let what = if indexed { "draw_elements" } else { "draw_arrays" };
        ctx.assert_frame_open(what);
        let program = ctx.bound_program.unwrap_or_else(|| {
            panic!("{what} with no program bound");
        });
        let layout = ctx.bound_layout.unwrap_or_else(|| {
            panic!("{what} with no input layout bound");
        });
        assert!(
            ctx.program(program).vertex_fingerprint == ctx.layout(layout).vertex_fingerprint,
            "{what} with an input layout built from different shader sources than the bound program"
        );
        assert!(
            ctx.bound_vertex.is_some(),
            "{what} with no vertex buffer bound"
        );
        if indexed {
            assert!(
                ctx.bound_index_buffer.is_some(),
                "draw_elements with no index buffer bound"
            );
        }
        let target = ctx.bound_framebuffer;
        let complete = {
            let entry = ctx.framebuffer(target);
            entry.is_default
                || entry
                    .attachment
                    .is_some_and(|id| ctx.texture(id).format.is_some())
        };
        assert!(complete, "{what} against an incomplete framebuffer");

        let triangles = triangle_count(topology, count);
        ctx.stats.draw_calls += 1;
        ctx.stats.triangles += triangles;
        ctx.draws.push(DrawRecord {
            topology,
            first,
            count,
            indexed,
            triangles,
        });
    }
}

impl GraphicsBackend for SoftBackend {
    fn begin_frame(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        assert!(!ctx.frame_open, "begin_frame with a frame already open");
        ctx.frame_open = true;
    }

    fn end_frame(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        assert!(ctx.frame_open, "end_frame with no open frame");
        ctx.frame_open = false;
        ctx.frame_index += 1;
        ctx.stats.frames += 1;
        log::trace!(
            "frame {} done: {} draw calls so far",
            ctx.frame_index,
            ctx.stats.draw_calls
        );
    }

    fn caps(&self) -> Caps {
        self.ctx.borrow().caps
    }

    fn is_time_continuous(&self) -> bool {
        self.ctx.borrow().timer_latency_frames == 0
    }

    fn create_texture(
        &mut self,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> Box<dyn Texture> {
        let mut ctx = self.ctx.borrow_mut();
        let id = ctx.textures.len();
        ctx.textures.push(Some(TextureEntry {
            min_filter,
            mag_filter,
            format: None,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }));
        Box::new(SoftTexture {
            ctx: Rc::clone(&self.ctx),
            id,
        })
    }

    fn create_framebuffer(&mut self) -> Box<dyn Framebuffer> {
        let mut ctx = self.ctx.borrow_mut();
        let id = ctx.framebuffers.len();
        ctx.framebuffers.push(Some(FramebufferEntry {
            attachment: None,
            is_default: false,
        }));
        Box::new(SoftFramebuffer {
            ctx: Rc::clone(&self.ctx),
            id,
        })
    }

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Box<dyn Buffer> {
        let mut ctx = self.ctx.borrow_mut();
        let id = ctx.buffers.len();
        ctx.buffers.push(Some(BufferEntry {
            kind,
            data: data.to_vec(),
        }));
        Box::new(SoftBuffer {
            ctx: Rc::clone(&self.ctx),
            id,
        })
    }

    fn create_program(
        &mut self,
        vertex: &ShaderSources,
        fragment: &ShaderSources,
    ) -> Result<Box<dyn Program>, ShaderError> {
        for (stage, sources) in [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)]
        {
            if sources.glsl.is_empty() && sources.hlsl.is_empty() {
                return Err(ShaderError::MissingSource { stage });
            }
        }
        let uniforms = Self::merge_uniforms(vertex, fragment)?;

        let mut ctx = self.ctx.borrow_mut();
        let generation = ctx.next_generation();
        let id = ctx.programs.len();
        let values = uniforms.iter().map(|_| UniformValue::Unset).collect();
        ctx.programs.push(Some(ProgramEntry {
            uniforms,
            values,
            generation,
            vertex_fingerprint: shader_fingerprint(vertex),
        }));
        log::trace!("created program {id} (generation {generation})");
        Ok(Box::new(SoftProgram {
            ctx: Rc::clone(&self.ctx),
            id,
        }))
    }

    fn create_input_layout(
        &mut self,
        vertex: &ShaderSources,
        layout: &[InputDesc],
    ) -> Result<Box<dyn InputLayout>, LayoutError> {
        if layout.len() != vertex.inputs.len() {
            return Err(LayoutError::SlotCountMismatch {
                expected: vertex.inputs.len(),
                found: layout.len(),
            });
        }
        for (slot, (input, desc)) in vertex.inputs.iter().zip(layout).enumerate() {
            if input.data_type != desc.data_type {
                return Err(LayoutError::TypeMismatch {
                    slot,
                    expected: input.data_type,
                    found: desc.data_type,
                });
            }
            if input.size != desc.size {
                return Err(LayoutError::SizeMismatch {
                    slot,
                    expected: input.size,
                    found: desc.size,
                });
            }
        }

        let mut ctx = self.ctx.borrow_mut();
        let id = ctx.layouts.len();
        ctx.layouts.push(Some(LayoutEntry {
            vertex_fingerprint: shader_fingerprint(vertex),
        }));
        Ok(Box::new(SoftInputLayout {
            ctx: Rc::clone(&self.ctx),
            id,
        }))
    }

    fn create_timer(&mut self) -> Box<dyn GpuTimer> {
        let ctx = self.ctx.borrow();
        assert!(
            ctx.caps.features.has(Features::TIMERS),
            "timer requested from a backend without the timers feature"
        );
        drop(ctx);
        Box::new(SoftTimer::new(Rc::clone(&self.ctx)))
    }

    fn default_framebuffer(&mut self) -> Box<dyn Framebuffer> {
        Box::new(SoftFramebuffer {
            ctx: Rc::clone(&self.ctx),
            id: DEFAULT_FRAMEBUFFER,
        })
    }

    fn nil_texture(&mut self) -> Box<dyn Texture> {
        Box::new(SoftTexture {
            ctx: Rc::clone(&self.ctx),
            id: NIL_TEXTURE,
        })
    }

    fn depth_func(&mut self, func: CompareFunction) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("depth_func");
        ctx.state.depth_func = func;
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("clear_color");
        ctx.state.clear_color = [r, g, b, a];
    }

    fn clear_depth(&mut self, depth: f32) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("clear_depth");
        ctx.state.clear_depth = depth;
    }

    fn clear(&mut self, buffers: ClearMask) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("clear");
        ctx.stats.clears += 1;
        ctx.last_clear = Some(buffers);
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("viewport");
        ctx.state.viewport = (x, y, width, height);
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32) {
        self.record_draw(topology, false, first, count);
    }

    fn draw_elements(&mut self, topology: PrimitiveTopology, first: u32, count: u32) {
        self.record_draw(topology, true, first, count);
    }

    fn set_blend(&mut self, enable: bool) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("set_blend");
        ctx.state.blend_enabled = enable;
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("blend_func");
        ctx.state.blend_src = src;
        ctx.state.blend_dst = dst;
    }

    fn set_depth_test(&mut self, enable: bool) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("set_depth_test");
        ctx.state.depth_test = enable;
    }

    fn depth_mask(&mut self, write_enabled: bool) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("depth_mask");
        ctx.state.depth_write = write_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn backend() -> SoftBackend {
        SoftBackend::new(SoftOptions::default())
    }

    fn triangle_sources() -> (ShaderSources, ShaderSources) {
        let vertex = ShaderSources {
            glsl: Cow::Borrowed(
                "attribute vec2 position; void main() { gl_Position = vec4(position, 0.0, 1.0); }",
            ),
            inputs: vec![slate_hal::api::InputLocation {
                name: Cow::Borrowed("position"),
                location: 0,
                semantic: Cow::Borrowed("POSITION"),
                semantic_index: 0,
                data_type: slate_hal::api::DataType::Float,
                size: 2,
            }],
            ..ShaderSources::default()
        };
        let fragment = ShaderSources {
            glsl: Cow::Borrowed("void main() { gl_FragColor = vec4(1.0); }"),
            ..ShaderSources::default()
        };
        (vertex, fragment)
    }

    fn triangle_layout() -> [InputDesc; 1] {
        [InputDesc {
            data_type: slate_hal::api::DataType::Float,
            size: 2,
            offset: 0,
        }]
    }

    #[test]
    fn one_triangle_frame() {
        let mut b = backend();

        let vertices: [f32; 6] = [0.0, 0.5, -0.5, -0.5, 0.5, -0.5];
        let mut vbo = b.create_buffer(BufferKind::Data, bytemuck::cast_slice(&vertices));
        let (vertex, fragment) = triangle_sources();
        let mut program = b.create_program(&vertex, &fragment).expect("program");
        let mut layout = b
            .create_input_layout(&vertex, &triangle_layout())
            .expect("layout");

        b.begin_frame();
        b.default_framebuffer().bind();
        b.viewport(0, 0, 640, 480);
        b.clear_color(0.0, 0.0, 0.0, 1.0);
        b.clear(ClearMask::COLOR);
        program.bind();
        layout.bind();
        vbo.bind_vertex(8, 0);
        b.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
        b.end_frame();

        let stats = b.stats();
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.clears, 1);
        assert_eq!(
            b.draws(),
            vec![DrawRecord {
                topology: PrimitiveTopology::TriangleList,
                first: 0,
                count: 3,
                indexed: false,
                triangles: 1,
            }]
        );
    }

    #[test]
    fn indexed_draw_records_the_index_count() {
        let mut b = backend();
        let vertices = [0.0f32; 8];
        let indices: [u16; 6] = [0, 1, 2, 2, 1, 3];
        let mut vbo = b.create_buffer(BufferKind::Data, bytemuck::cast_slice(&vertices));
        let mut ibo = b.create_buffer(BufferKind::Index, bytemuck::cast_slice(&indices));
        let (vertex, fragment) = triangle_sources();
        let mut program = b.create_program(&vertex, &fragment).expect("program");
        let mut layout = b
            .create_input_layout(&vertex, &triangle_layout())
            .expect("layout");

        b.begin_frame();
        program.bind();
        layout.bind();
        vbo.bind_vertex(8, 0);
        ibo.bind();
        b.draw_elements(PrimitiveTopology::TriangleList, 0, 6);
        b.end_frame();

        assert_eq!(b.stats().triangles, 2);
        assert!(b.draws()[0].indexed);
    }

    #[test]
    fn state_setters_persist_across_draws() {
        let mut b = backend();
        b.begin_frame();
        b.set_blend(true);
        b.blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);
        b.set_depth_test(true);
        b.depth_func(CompareFunction::Greater);
        b.depth_mask(false);
        b.end_frame();

        // No implicit reset at the frame boundary.
        let state = b.pipeline_state();
        assert!(state.blend_enabled);
        assert_eq!(state.blend_src, BlendFactor::One);
        assert_eq!(state.blend_dst, BlendFactor::OneMinusSrcAlpha);
        assert!(state.depth_test);
        assert_eq!(state.depth_func, CompareFunction::Greater);
        assert!(!state.depth_write);
    }

    #[test]
    fn state_setters_are_idempotent() {
        let mut a = backend();
        a.begin_frame();
        a.set_blend(true);
        a.blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);
        a.depth_func(CompareFunction::Greater);
        a.end_frame();

        let mut b = backend();
        b.begin_frame();
        b.set_blend(true);
        b.set_blend(true);
        b.blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);
        b.blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);
        b.depth_func(CompareFunction::Greater);
        b.depth_func(CompareFunction::Greater);
        b.end_frame();

        assert_eq!(a.pipeline_state(), b.pipeline_state());
    }

    #[test]
    fn caps_are_stable() {
        let b = backend();
        let caps = b.caps();
        assert!(caps.features.has(Features::TIMERS));
        assert!(caps.features.has(Features::TIMERS | Features::FLOAT_RENDER_TARGETS));
        assert_eq!(caps.max_texture_size, 8192);
        assert_eq!(b.caps(), caps);
    }

    #[test]
    #[should_panic(expected = "already open")]
    fn nested_frames_panic() {
        let mut b = backend();
        b.begin_frame();
        b.begin_frame();
    }

    #[test]
    #[should_panic(expected = "no open frame")]
    fn unmatched_end_frame_panics() {
        let mut b = backend();
        b.end_frame();
    }

    #[test]
    #[should_panic(expected = "outside a begin_frame/end_frame pair")]
    fn drawing_outside_a_frame_panics() {
        let mut b = backend();
        b.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
    }

    #[test]
    #[should_panic(expected = "no program bound")]
    fn drawing_without_a_program_panics() {
        let mut b = backend();
        b.begin_frame();
        b.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
    }

    #[test]
    #[should_panic(expected = "different shader sources")]
    fn mismatched_layout_and_program_panic() {
        let mut b = backend();
        let (vertex, fragment) = triangle_sources();
        let mut program = b.create_program(&vertex, &fragment).expect("program");

        let mut other_vertex = vertex.clone();
        other_vertex.glsl = Cow::Borrowed(
            "attribute vec2 position; void main() { gl_Position = vec4(position, 1.0, 1.0); }",
        );
        let mut layout = b
            .create_input_layout(&other_vertex, &triangle_layout())
            .expect("layout");

        let vertices = [0.0f32; 6];
        let mut vbo = b.create_buffer(BufferKind::Data, bytemuck::cast_slice(&vertices));

        b.begin_frame();
        program.bind();
        layout.bind();
        vbo.bind_vertex(8, 0);
        b.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
    }

    #[test]
    #[should_panic(expected = "no index buffer bound")]
    fn indexed_draw_without_an_index_buffer_panics() {
        let mut b = backend();
        let (vertex, fragment) = triangle_sources();
        let mut program = b.create_program(&vertex, &fragment).expect("program");
        let mut layout = b
            .create_input_layout(&vertex, &triangle_layout())
            .expect("layout");
        let vertices = [0.0f32; 6];
        let mut vbo = b.create_buffer(BufferKind::Data, bytemuck::cast_slice(&vertices));

        b.begin_frame();
        program.bind();
        layout.bind();
        vbo.bind_vertex(8, 0);
        b.draw_elements(PrimitiveTopology::TriangleList, 0, 3);
    }

    #[test]
    #[should_panic(expected = "incomplete framebuffer")]
    fn drawing_into_an_unattached_framebuffer_panics() {
        let mut b = backend();
        let (vertex, fragment) = triangle_sources();
        let mut program = b.create_program(&vertex, &fragment).expect("program");
        let mut layout = b
            .create_input_layout(&vertex, &triangle_layout())
            .expect("layout");
        let vertices = [0.0f32; 6];
        let mut vbo = b.create_buffer(BufferKind::Data, bytemuck::cast_slice(&vertices));
        let mut fb = b.create_framebuffer();

        b.begin_frame();
        fb.bind();
        program.bind();
        layout.bind();
        vbo.bind_vertex(8, 0);
        b.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
    }

    #[test]
    fn missing_shader_source_is_recoverable() {
        let mut b = backend();
        let empty = ShaderSources::default();
        let (_, fragment) = triangle_sources();
        match b.create_program(&empty, &fragment) {
            Err(ShaderError::MissingSource { stage }) => {
                assert_eq!(stage, ShaderStage::Vertex);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("program creation should have failed"),
        }
    }

    #[test]
    fn conflicting_uniform_declarations_fail_to_link() {
        let mut b = backend();
        let mut vertex = triangle_sources().0;
        vertex.uniforms = vec![UniformDesc {
            name: Cow::Borrowed("scale"),
            data_type: slate_hal::api::DataType::Float,
            size: 1,
            offset: 0,
        }];
        let mut fragment = triangle_sources().1;
        fragment.uniforms = vec![UniformDesc {
            name: Cow::Borrowed("scale"),
            data_type: slate_hal::api::DataType::Float,
            size: 4,
            offset: 0,
        }];
        assert!(matches!(
            b.create_program(&vertex, &fragment),
            Err(ShaderError::LinkFailed { .. })
        ));
    }

    #[test]
    fn layout_validation_reports_the_offending_slot() {
        let mut b = backend();
        let (vertex, _) = triangle_sources();

        assert_eq!(
            b.create_input_layout(&vertex, &[]).err(),
            Some(LayoutError::SlotCountMismatch {
                expected: 1,
                found: 0
            })
        );

        let wrong_size = [InputDesc {
            data_type: slate_hal::api::DataType::Float,
            size: 3,
            offset: 0,
        }];
        assert_eq!(
            b.create_input_layout(&vertex, &wrong_size).err(),
            Some(LayoutError::SizeMismatch {
                slot: 0,
                expected: 2,
                found: 3
            })
        );

        let wrong_type = [InputDesc {
            data_type: slate_hal::api::DataType::Short,
            size: 2,
            offset: 0,
        }];
        assert_eq!(
            b.create_input_layout(&vertex, &wrong_type).err(),
            Some(LayoutError::TypeMismatch {
                slot: 0,
                expected: slate_hal::api::DataType::Float,
                found: slate_hal::api::DataType::Short
            })
        );
    }

    #[test]
    #[should_panic(expected = "without the timers feature")]
    fn timer_creation_requires_the_feature() {
        let options = SoftOptions {
            features: Features::NONE,
            ..SoftOptions::default()
        };
        let mut b = SoftBackend::new(options);
        let _ = b.create_timer();
    }
}
