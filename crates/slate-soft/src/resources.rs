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

//! Handle types returned by [`SoftBackend`](crate::SoftBackend).
//!
//! Each handle is an id into the shared context's stores. Releasing a
//! handle vacates its slot; slots are never reused, so any later use of
//! the released resource is caught by the store accessors.

use crate::context::{SoftContext, NIL_TEXTURE};
use slate_hal::api::{BufferKind, CpuImage, DataType, Features, TextureFormat, Uniform};
use slate_hal::error::FramebufferError;
use slate_hal::traits::{Buffer, Framebuffer, InputLayout, Program, Texture};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// A texture handle of the software backend.
///
/// Beyond the contract surface, the pixel contents are readable through
/// [`contents`](Self::contents) so tests can verify uploads.
pub struct SoftTexture {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) id: usize,
}

impl SoftTexture {
    fn is_nil(&self) -> bool {
        self.id == NIL_TEXTURE
    }

    /// Returns a copy of the texture's current pixel contents.
    pub fn contents(&self) -> Vec<u8> {
        assert!(!self.is_nil(), "nil texture has no contents");
        self.ctx.borrow().texture(self.id).pixels.clone()
    }
}

impl Texture for SoftTexture {
    fn upload(&mut self, image: &CpuImage) {
        assert!(!self.is_nil(), "cannot upload to the nil texture");
        let mut ctx = self.ctx.borrow_mut();
        let entry = ctx.texture_mut(self.id);
        assert!(
            entry.format.is_some(),
            "upload to a texture that was never resized"
        );
        assert!(
            image.width() == entry.width && image.height() == entry.height,
            "upload size {}x{} does not match texture size {}x{}",
            image.width(),
            image.height(),
            entry.width,
            entry.height
        );
        entry.pixels.clear();
        entry.pixels.extend_from_slice(image.pixels());
    }

    fn bind(&mut self, unit: u32) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("texture bind");
        let unit = unit as usize;
        assert!(
            unit < ctx.texture_units.len(),
            "texture unit {unit} out of range"
        );
        // The nil sentinel unbinds; anything else takes the unit over.
        if self.is_nil() {
            ctx.texture_units[unit] = None;
        } else {
            let _ = ctx.texture(self.id);
            ctx.texture_units[unit] = Some(self.id);
        }
    }

    fn resize(&mut self, format: TextureFormat, width: u32, height: u32) {
        assert!(!self.is_nil(), "cannot resize the nil texture");
        let mut ctx = self.ctx.borrow_mut();
        assert!(width > 0 && height > 0, "texture resize to zero size");
        let max = ctx.caps.max_texture_size;
        assert!(
            width <= max && height <= max,
            "texture size {width}x{height} exceeds the maximum of {max}"
        );
        if format == TextureFormat::Rgba16Float {
            assert!(
                ctx.caps.features.has(Features::FLOAT_RENDER_TARGETS),
                "float texture requested without the float feature"
            );
        }
        let len = width as usize * height as usize * format.bytes_per_pixel() as usize;
        let entry = ctx.texture_mut(self.id);
        entry.format = Some(format);
        entry.width = width;
        entry.height = height;
        entry.pixels = vec![0; len];
    }

    fn release(self: Box<Self>) {
        if self.is_nil() {
            return;
        }
        let mut ctx = self.ctx.borrow_mut();
        assert!(
            !ctx.texture_units.contains(&Some(self.id)),
            "texture released while bound to a texture unit"
        );
        let attached = ctx
            .framebuffers
            .iter()
            .flatten()
            .any(|fb| fb.attachment == Some(self.id));
        assert!(!attached, "texture released while attached to a framebuffer");
        let _ = ctx.texture(self.id);
        log::trace!("released texture {}", self.id);
        ctx.textures[self.id] = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A buffer handle of the software backend.
pub struct SoftBuffer {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) id: usize,
}

impl SoftBuffer {
    /// Returns a copy of the buffer's contents.
    pub fn contents(&self) -> Vec<u8> {
        self.ctx.borrow().buffer(self.id).data.clone()
    }
}

impl Buffer for SoftBuffer {
    fn bind(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("buffer bind");
        match ctx.buffer(self.id).kind {
            BufferKind::Index => ctx.bound_index_buffer = Some(self.id),
            BufferKind::Data => ctx.bound_data_buffer = Some(self.id),
        }
    }

    fn bind_vertex(&mut self, stride: usize, offset: usize) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("vertex buffer bind");
        assert!(
            ctx.buffer(self.id).kind == BufferKind::Data,
            "index buffer bound as a vertex source"
        );
        ctx.bound_vertex = Some(crate::context::VertexBinding {
            buffer: self.id,
            stride,
            offset,
        });
    }

    fn release(self: Box<Self>) {
        let mut ctx = self.ctx.borrow_mut();
        let still_bound = ctx.bound_index_buffer == Some(self.id)
            || ctx.bound_data_buffer == Some(self.id)
            || ctx.bound_vertex.map(|v| v.buffer) == Some(self.id);
        assert!(!still_bound, "buffer released while bound");
        let _ = ctx.buffer(self.id);
        log::trace!("released buffer {}", self.id);
        ctx.buffers[self.id] = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A framebuffer handle of the software backend.
pub struct SoftFramebuffer {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) id: usize,
}

impl Framebuffer for SoftFramebuffer {
    fn bind(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("framebuffer bind");
        let _ = ctx.framebuffer(self.id);
        ctx.bound_framebuffer = self.id;
    }

    fn bind_texture(&mut self, texture: &dyn Texture) {
        let texture = texture
            .as_any()
            .downcast_ref::<SoftTexture>()
            .expect("foreign texture attached to a software framebuffer");
        assert!(
            texture.id != NIL_TEXTURE,
            "nil texture attached to a framebuffer"
        );
        let mut ctx = self.ctx.borrow_mut();
        assert!(
            !ctx.framebuffer(self.id).is_default,
            "cannot attach a texture to the default framebuffer"
        );
        let _ = ctx.texture(texture.id);
        ctx.framebuffer_mut(self.id).attachment = Some(texture.id);
    }

    fn invalidate(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        let _ = ctx.framebuffer(self.id);
        if let Some(attachment) = ctx.framebuffer(self.id).attachment {
            let entry = ctx.texture_mut(attachment);
            entry.pixels.fill(0);
        }
    }

    fn is_complete(&self) -> Result<(), FramebufferError> {
        let ctx = self.ctx.borrow();
        let entry = ctx.framebuffer(self.id);
        if entry.is_default {
            return Ok(());
        }
        let attachment = entry.attachment.ok_or(FramebufferError::NoAttachment)?;
        let texture = ctx.texture(attachment);
        let format = texture.format.ok_or(FramebufferError::UnsizedAttachment)?;
        if format == TextureFormat::Rgba16Float
            && !ctx.caps.features.has(Features::FLOAT_RENDER_TARGETS)
        {
            return Err(FramebufferError::UnsupportedFormat { format });
        }
        Ok(())
    }

    fn release(self: Box<Self>) {
        let mut ctx = self.ctx.borrow_mut();
        if ctx.framebuffer(self.id).is_default {
            return;
        }
        assert!(
            ctx.bound_framebuffer != self.id,
            "framebuffer released while bound"
        );
        log::trace!("released framebuffer {}", self.id);
        ctx.framebuffers[self.id] = None;
    }
}

/// A program handle of the software backend.
pub struct SoftProgram {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) id: usize,
}

impl SoftProgram {
    fn check_handle(&self, ctx: &SoftContext, uniform: Uniform) -> usize {
        let entry = ctx.program(self.id);
        assert!(
            uniform.generation == entry.generation,
            "uniform handle belongs to a different or released program"
        );
        let index = uniform.index as usize;
        assert!(index < entry.uniforms.len(), "uniform index out of range");
        index
    }

    fn check_float(&self, ctx: &SoftContext, index: usize, components: usize) {
        let desc = &ctx.program(self.id).uniforms[index];
        if desc.data_type == DataType::Float {
            assert!(
                desc.size == components,
                "uniform '{}' takes {} float components, not {}",
                desc.name,
                desc.size,
                components
            );
        }
    }

    fn check_int(&self, ctx: &SoftContext, index: usize) {
        let desc = &ctx.program(self.id).uniforms[index];
        assert!(
            desc.data_type != DataType::Float,
            "uniform '{}' is float-typed, not integer",
            desc.name
        );
    }
}

impl Program for SoftProgram {
    fn bind(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("program bind");
        let _ = ctx.program(self.id);
        ctx.bound_program = Some(self.id);
    }

    fn uniform_for(&self, name: &str) -> Option<Uniform> {
        let ctx = self.ctx.borrow();
        let entry = ctx.program(self.id);
        entry
            .uniforms
            .iter()
            .position(|desc| desc.name == name)
            .map(|index| Uniform {
                index: index as u32,
                generation: entry.generation,
            })
    }

    fn set_uniform_i32(&mut self, uniform: Uniform, value: i32) {
        let mut ctx = self.ctx.borrow_mut();
        let index = self.check_handle(&ctx, uniform);
        self.check_int(&ctx, index);
        ctx.program_mut(self.id).values[index] = crate::context::UniformValue::I32(value);
    }

    fn set_uniform_f32(&mut self, uniform: Uniform, value: f32) {
        let mut ctx = self.ctx.borrow_mut();
        let index = self.check_handle(&ctx, uniform);
        self.check_float(&ctx, index, 1);
        ctx.program_mut(self.id).values[index] = crate::context::UniformValue::F32(value);
    }

    fn set_uniform_vec2(&mut self, uniform: Uniform, value: [f32; 2]) {
        let mut ctx = self.ctx.borrow_mut();
        let index = self.check_handle(&ctx, uniform);
        self.check_float(&ctx, index, 2);
        ctx.program_mut(self.id).values[index] = crate::context::UniformValue::Vec2(value);
    }

    fn set_uniform_vec4(&mut self, uniform: Uniform, value: [f32; 4]) {
        let mut ctx = self.ctx.borrow_mut();
        let index = self.check_handle(&ctx, uniform);
        self.check_float(&ctx, index, 4);
        ctx.program_mut(self.id).values[index] = crate::context::UniformValue::Vec4(value);
    }

    fn release(self: Box<Self>) {
        let mut ctx = self.ctx.borrow_mut();
        assert!(
            ctx.bound_program != Some(self.id),
            "program released while bound"
        );
        let _ = ctx.program(self.id);
        log::trace!("released program {}", self.id);
        ctx.programs[self.id] = None;
    }
}

/// An input layout handle of the software backend.
pub struct SoftInputLayout {
    pub(crate) ctx: Rc<RefCell<SoftContext>>,
    pub(crate) id: usize,
}

impl InputLayout for SoftInputLayout {
    fn bind(&mut self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.assert_frame_open("input layout bind");
        let _ = ctx.layout(self.id);
        ctx.bound_layout = Some(self.id);
    }

    fn release(self: Box<Self>) {
        let mut ctx = self.ctx.borrow_mut();
        assert!(
            ctx.bound_layout != Some(self.id),
            "input layout released while bound"
        );
        let _ = ctx.layout(self.id);
        log::trace!("released input layout {}", self.id);
        ctx.layouts[self.id] = None;
    }
}
