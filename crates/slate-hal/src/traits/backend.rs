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

use crate::api::*;
use crate::error::{LayoutError, ShaderError};
use crate::traits::{Buffer, Framebuffer, GpuTimer, InputLayout, Program, Texture};

/// The root abstraction over an underlying graphics API such as OpenGL or
/// Direct3D, as consumed by the 2D rendering pipeline.
///
/// A backend is three things at once: a factory for every resource handle,
/// the holder of the capability descriptor, and the per-frame command/state
/// surface issued against the currently bound resources. One instance
/// exists per rendering context and lives as long as the context; all
/// binding state (current program, framebuffer, bound textures per unit) is
/// a field of the instance, so multiple contexts remain independent.
///
/// # Frame discipline
///
/// Every draw, state and bind call must occur between a matched
/// [`begin_frame`](Self::begin_frame)/[`end_frame`](Self::end_frame) pair;
/// nesting frames is forbidden. Resource creation and release happen
/// outside frames; resources are not frame-scoped and may live across many
/// frames. State setters persist until changed; there is no implicit reset
/// between draw calls.
pub trait GraphicsBackend {
    /// Marks the beginning of a frame.
    ///
    /// Calling this with a frame already open is a caller error.
    fn begin_frame(&mut self);

    /// Marks the end of the current frame.
    ///
    /// Calling this without an open frame is a caller error.
    fn end_frame(&mut self);

    /// Returns the backend's static capabilities.
    ///
    /// This is a pure query; the returned value is stable for the backend's
    /// lifetime.
    fn caps(&self) -> Caps;

    /// Reports whether timer results are guaranteed available at the point
    /// of call, as opposed to backends where timer queries lag behind frame
    /// submission and need a future frame before results land.
    ///
    /// This is a static, advisory property of the backend: callers must
    /// still treat [`GpuTimer::duration`] returning `None` as authoritative.
    fn is_time_continuous(&self) -> bool;

    // --- Resource creation ---

    /// Creates a texture with the given minification and magnification
    /// filters, fixed for the texture's lifetime.
    ///
    /// The texture has no storage until
    /// [`resize`](crate::traits::Texture::resize) is called.
    fn create_texture(&mut self, min_filter: FilterMode, mag_filter: FilterMode)
        -> Box<dyn Texture>;

    /// Creates an offscreen framebuffer.
    ///
    /// The framebuffer is incomplete until a texture is attached via
    /// [`bind_texture`](crate::traits::Framebuffer::bind_texture); callers
    /// must check [`is_complete`](crate::traits::Framebuffer::is_complete)
    /// after attaching.
    fn create_framebuffer(&mut self) -> Box<dyn Framebuffer>;

    /// Creates a buffer of the given usage kind, initialized with `data`
    /// (which may be empty).
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Box<dyn Buffer>;

    /// Compiles and links a program from a vertex/fragment shader pair.
    ///
    /// This is one of only two fallible creation paths: compilation and
    /// linking depend on user-supplied sources and the driver, so failure
    /// is recoverable and must be checked. All other creation methods are
    /// assumed to succeed or fail fatally.
    fn create_program(
        &mut self,
        vertex: &ShaderSources,
        fragment: &ShaderSources,
    ) -> Result<Box<dyn Program>, ShaderError>;

    /// Builds the backend-specific mapping between a buffer's byte layout
    /// and a shader's per-vertex inputs.
    ///
    /// `vertex` must be the exact same shader source set used to create the
    /// program the layout will be bound with; `layout` must agree with the
    /// shader's input list in element type and count per slot, or an error
    /// is returned.
    fn create_input_layout(
        &mut self,
        vertex: &ShaderSources,
        layout: &[InputDesc],
    ) -> Result<Box<dyn InputLayout>, LayoutError>;

    /// Creates a GPU timer.
    ///
    /// Only meaningful when [`Features::TIMERS`] is present in
    /// [`caps`](Self::caps).
    fn create_timer(&mut self) -> Box<dyn GpuTimer>;

    // --- Sentinels ---

    /// Returns the default (window) framebuffer.
    ///
    /// The handle is a fixed sentinel usable without explicit creation or
    /// release.
    fn default_framebuffer(&mut self) -> Box<dyn Framebuffer>;

    /// Returns the nil texture, a no-op placeholder.
    ///
    /// Binding it to a unit unbinds whatever texture the unit held. The
    /// handle is a fixed sentinel usable without explicit creation or
    /// release.
    fn nil_texture(&mut self) -> Box<dyn Texture>;

    // --- Command/state surface ---

    /// Sets the depth comparison function. Persists until changed.
    fn depth_func(&mut self, func: CompareFunction);

    /// Sets the color that [`clear`](Self::clear) writes. Persists until
    /// changed.
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Sets the depth value that [`clear`](Self::clear) writes. Persists
    /// until changed.
    fn clear_depth(&mut self, depth: f32);

    /// Wipes the attachments selected by `buffers` on the currently bound
    /// framebuffer, using the current clear color and depth.
    fn clear(&mut self, buffers: ClearMask);

    /// Sets the active rasterization rectangle, in pixels.
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Draws `count` vertices starting at vertex `first` from the currently
    /// bound vertex buffer, interpreted through the bound input layout and
    /// program according to `topology`.
    ///
    /// Drawing with no program bound, or with an input layout built from
    /// different shader sources than the bound program, is a caller error
    /// with backend-defined behavior.
    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32);

    /// Draws `count` indices starting at index `first` from the currently
    /// bound index buffer, otherwise as [`draw_arrays`](Self::draw_arrays).
    fn draw_elements(&mut self, topology: PrimitiveTopology, first: u32, count: u32);

    /// Enables or disables blending. Persists until changed.
    fn set_blend(&mut self, enable: bool);

    /// Sets the source and destination blend factors. Persists until
    /// changed.
    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor);

    /// Enables or disables the depth test. Persists until changed.
    fn set_depth_test(&mut self, enable: bool);

    /// Enables or disables depth writes. Persists until changed.
    fn depth_mask(&mut self, write_enabled: bool);
}
