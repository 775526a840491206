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

use crate::api::{CpuImage, TextureFormat};
use crate::error::FramebufferError;
use std::any::Any;

/// A 2D image resource owned by the backend.
///
/// The minification/magnification filter pair is fixed at creation; the
/// pixel format and dimensions are set by [`resize`](Self::resize) and
/// fixed until the next resize. The same texture can serve as a sampler
/// input (via [`bind`](Self::bind)) and as a render target (via
/// [`Framebuffer::bind_texture`]); whether both roles may coexist is left
/// to the backend; this layer does not prevent it.
pub trait Texture {
    /// Uploads CPU-side RGBA pixels into the texture.
    ///
    /// The image dimensions must match the texture's current dimensions
    /// exactly; any other size is a caller error.
    fn upload(&mut self, image: &CpuImage);

    /// Binds the texture to the numbered texture unit for sampling.
    ///
    /// Overwrites whatever the unit previously held.
    fn bind(&mut self, unit: u32);

    /// Sets the texture's format and dimensions, allocating storage.
    ///
    /// Resizing may reallocate the underlying storage and invalidates any
    /// prior contents.
    fn resize(&mut self, format: TextureFormat, width: u32, height: u32);

    /// Releases the texture.
    ///
    /// Each created texture must be released exactly once; releasing it
    /// while it is still bound is a caller error with backend-defined
    /// behavior.
    fn release(self: Box<Self>);

    /// Escape hatch for backend-specific operations on the concrete type,
    /// such as attaching the texture to a concrete framebuffer.
    fn as_any(&self) -> &dyn Any;
}

/// A GPU-resident byte block tagged with a usage kind.
///
/// Contents are fixed at creation; mutation happens only through
/// backend-specific means.
pub trait Buffer {
    /// Binds the buffer to the target implied by its usage kind (index
    /// buffers to the index slot, data buffers to the data slot).
    fn bind(&mut self);

    /// Binds the buffer as the vertex attribute source, with the given
    /// per-vertex stride and starting byte offset.
    ///
    /// Only valid for buffers created with
    /// [`BufferKind::Data`](crate::api::BufferKind::Data).
    fn bind_vertex(&mut self, stride: usize, offset: usize);

    /// Releases the buffer. Must be called exactly once.
    fn release(self: Box<Self>);

    /// Escape hatch for backend-specific operations on the concrete type,
    /// such as reading the contents back where the backend supports it.
    fn as_any(&self) -> &dyn Any;
}

/// A render target: either the default (window) framebuffer or an
/// offscreen one.
pub trait Framebuffer {
    /// Makes this framebuffer the current render target.
    fn bind(&mut self);

    /// Attaches `texture` as the framebuffer's color render target.
    ///
    /// This is the render-target role of a texture, distinct from its
    /// sampler role via [`Texture::bind`]. Attaching does not validate
    /// completeness; callers must check [`is_complete`](Self::is_complete)
    /// afterwards.
    fn bind_texture(&mut self, texture: &dyn Texture);

    /// Hints the backend that the framebuffer's current contents will not
    /// be read again and may be discarded.
    fn invalidate(&mut self);

    /// Checks whether the framebuffer can be rendered to.
    ///
    /// The default framebuffer is always complete. An offscreen
    /// framebuffer is complete once it has a usable attachment; the error
    /// describes why it is not.
    fn is_complete(&self) -> Result<(), FramebufferError>;

    /// Releases the framebuffer. Must be called exactly once for created
    /// framebuffers; a no-op for the default framebuffer sentinel.
    fn release(self: Box<Self>);
}

/// The backend-specific mapping between a buffer's byte layout and a
/// shader's per-vertex inputs.
///
/// A layout is only valid together with a program created from the exact
/// same shader source set; binding it with any other program is a caller
/// error.
pub trait InputLayout {
    /// Makes this layout current for subsequent draws.
    fn bind(&mut self);

    /// Releases the layout. Must be called exactly once.
    fn release(self: Box<Self>);
}
