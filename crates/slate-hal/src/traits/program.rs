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

use crate::api::Uniform;

/// A compiled vertex/fragment shader pair with named uniform slots.
pub trait Program {
    /// Makes this program current for subsequent draws.
    fn bind(&mut self);

    /// Resolves a named uniform to an opaque handle.
    ///
    /// Returns `Some` iff `name` appears in the program's uniform
    /// descriptor list. Handles are invalidated when the program is
    /// released; passing a stale or foreign handle to the setters below is
    /// a caller error.
    fn uniform_for(&self, name: &str) -> Option<Uniform>;

    /// Sets a scalar integer uniform.
    fn set_uniform_i32(&mut self, uniform: Uniform, value: i32);

    /// Sets a scalar float uniform.
    fn set_uniform_f32(&mut self, uniform: Uniform, value: f32);

    /// Sets a two-component float uniform.
    fn set_uniform_vec2(&mut self, uniform: Uniform, value: [f32; 2]);

    /// Sets a four-component float uniform.
    fn set_uniform_vec4(&mut self, uniform: Uniform, value: [f32; 4]);

    /// Releases the program and invalidates every handle it resolved.
    /// Must be called exactly once.
    fn release(self: Box<Self>);
}
