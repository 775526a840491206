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

//! The recoverable error types of the rendering contract.
//!
//! These cover the first error tier: failures that are routinely possible
//! from user-supplied or environment-dependent shader and GPU state, and
//! that callers must check explicitly. Contract violations (stale handles,
//! drawing without a bound program, double release, calls outside a frame)
//! form the second tier and are *not* represented here: they are
//! backend-defined behavior, and a conforming backend may fail fast with a
//! defensive assertion but is not required to.

use crate::api::{DataType, ShaderStage, TextureFormat};
use std::fmt;

/// An error from compiling or linking a shader program.
///
/// Returned by
/// [`GraphicsBackend::create_program`](crate::traits::GraphicsBackend::create_program).
#[derive(Debug, PartialEq, Eq)]
pub enum ShaderError {
    /// The bundle carries no source form the backend understands for the
    /// given stage.
    MissingSource {
        /// The stage whose source was absent.
        stage: ShaderStage,
    },
    /// The shader source failed to compile.
    CompilationFailed {
        /// The stage that failed.
        stage: ShaderStage,
        /// Detailed error messages from the shader compiler.
        details: String,
    },
    /// The compiled stages failed to link into a program.
    LinkFailed {
        /// Detailed error messages from the linker.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::MissingSource { stage } => {
                write!(f, "No usable shader source for the {stage:?} stage")
            }
            ShaderError::CompilationFailed { stage, details } => {
                write!(f, "Shader compilation failed for {stage:?} stage: {details}")
            }
            ShaderError::LinkFailed { details } => {
                write!(f, "Program linking failed: {details}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error from building an input layout against a shader's input list.
///
/// Returned by
/// [`GraphicsBackend::create_input_layout`](crate::traits::GraphicsBackend::create_input_layout).
#[derive(Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout describes a different number of attributes than the
    /// shader declares.
    SlotCountMismatch {
        /// The number of inputs the shader declares.
        expected: usize,
        /// The number of attributes the layout describes.
        found: usize,
    },
    /// An attribute's element type disagrees with the shader input at the
    /// same slot.
    TypeMismatch {
        /// The slot index.
        slot: usize,
        /// The element type the shader declares.
        expected: DataType,
        /// The element type the layout describes.
        found: DataType,
    },
    /// An attribute's element count disagrees with the shader input at the
    /// same slot.
    SizeMismatch {
        /// The slot index.
        slot: usize,
        /// The element count the shader declares.
        expected: usize,
        /// The element count the layout describes.
        found: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::SlotCountMismatch { expected, found } => {
                write!(
                    f,
                    "Input layout has {found} attributes but the shader declares {expected}"
                )
            }
            LayoutError::TypeMismatch {
                slot,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Input layout slot {slot} has type {found:?} but the shader declares {expected:?}"
                )
            }
            LayoutError::SizeMismatch {
                slot,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Input layout slot {slot} has {found} elements but the shader declares {expected}"
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// An error describing why an offscreen framebuffer cannot be rendered to.
///
/// Returned by
/// [`Framebuffer::is_complete`](crate::traits::Framebuffer::is_complete).
/// Completeness is a fallible check, not an invariant enforced at bind
/// time; callers must check after attaching.
#[derive(Debug, PartialEq, Eq)]
pub enum FramebufferError {
    /// The framebuffer has no texture attached.
    NoAttachment,
    /// The attached texture has no storage yet (it was never resized).
    UnsizedAttachment,
    /// The attached texture's format cannot be rendered to on this backend.
    UnsupportedFormat {
        /// The offending attachment format.
        format: TextureFormat,
    },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferError::NoAttachment => {
                write!(f, "Framebuffer is incomplete: no texture attached")
            }
            FramebufferError::UnsizedAttachment => {
                write!(
                    f,
                    "Framebuffer is incomplete: attached texture has no storage"
                )
            }
            FramebufferError::UnsupportedFormat { format } => {
                write!(
                    f,
                    "Framebuffer is incomplete: {format:?} is not renderable on this backend"
                )
            }
        }
    }
}

impl std::error::Error for FramebufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::CompilationFailed {
            stage: ShaderStage::Vertex,
            details: "syntax error at line 5".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Shader compilation failed for Vertex stage: syntax error at line 5"
        );

        let missing = ShaderError::MissingSource {
            stage: ShaderStage::Fragment,
        };
        assert_eq!(
            format!("{missing}"),
            "No usable shader source for the Fragment stage"
        );
    }

    #[test]
    fn layout_error_display() {
        let err = LayoutError::TypeMismatch {
            slot: 1,
            expected: DataType::Float,
            found: DataType::Short,
        };
        assert_eq!(
            format!("{err}"),
            "Input layout slot 1 has type Short but the shader declares Float"
        );

        let count = LayoutError::SlotCountMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(
            format!("{count}"),
            "Input layout has 3 attributes but the shader declares 2"
        );
    }

    #[test]
    fn framebuffer_error_display() {
        assert_eq!(
            format!("{}", FramebufferError::NoAttachment),
            "Framebuffer is incomplete: no texture attached"
        );
        assert_eq!(
            format!(
                "{}",
                FramebufferError::UnsupportedFormat {
                    format: TextureFormat::Rgba16Float
                }
            ),
            "Framebuffer is incomplete: Rgba16Float is not renderable on this backend"
        );
    }
}
