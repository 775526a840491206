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

//! Command-surface state vocabulary: clear masks, blend and depth state,
//! primitive topology.

/// A bitmask selecting which attachment kinds [`clear`] wipes.
///
/// [`clear`]: crate::traits::GraphicsBackend::clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClearMask {
    bits: u32,
}

impl ClearMask {
    /// Clears nothing.
    pub const NONE: Self = Self { bits: 0 };
    /// The color attachment.
    pub const COLOR: Self = Self { bits: 1 << 0 };
    /// The depth attachment.
    pub const DEPTH: Self = Self { bits: 1 << 1 };

    /// Creates a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns `true` if every bit in `other` is present in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns `true` if no attachment kind is selected.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for ClearMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitOrAssign for ClearMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// Defines how vertices are connected to form primitives in a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Every three vertices form an isolated triangle.
    TriangleList,
    /// Vertices form a connected triangle strip.
    TriangleStrip,
}

/// A factor in the blend equation, determining how much the source or
/// destination color contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// The factor is `1.0`.
    One,
    /// The factor is `1.0 - src.a`.
    OneMinusSrcAlpha,
    /// The factor is `0.0`.
    Zero,
    /// The factor is the destination color.
    DstColor,
}

/// The comparison function used for depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// The test never passes.
    Never,
    /// Passes if the new value is less than the existing value.
    Less,
    /// Passes if the new value is equal to the existing value.
    Equal,
    /// Passes if the new value is less than or equal to the existing value.
    LessEqual,
    /// Passes if the new value is greater than the existing value.
    Greater,
    /// Passes if the new value is not equal to the existing value.
    NotEqual,
    /// Passes if the new value is greater than or equal to the existing
    /// value.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_mask_combines() {
        let both = ClearMask::COLOR | ClearMask::DEPTH;
        assert!(both.contains(ClearMask::COLOR));
        assert!(both.contains(ClearMask::DEPTH));
        assert_eq!(both.bits(), 0b11);
    }

    #[test]
    fn clear_mask_empty_contains_nothing_but_none() {
        let none = ClearMask::NONE;
        assert!(none.is_empty());
        assert!(none.contains(ClearMask::NONE));
        assert!(!none.contains(ClearMask::COLOR));
    }

    #[test]
    fn clear_mask_bitor_assign() {
        let mut mask = ClearMask::COLOR;
        mask |= ClearMask::DEPTH;
        assert!(mask.contains(ClearMask::COLOR | ClearMask::DEPTH));
    }
}
