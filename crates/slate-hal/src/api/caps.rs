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

//! Capability negotiation: feature flags and static backend limits.

/// A bit-set of optional backend abilities.
///
/// Querying [`Features::has`] against [`Caps::features`] is the only
/// mechanism for a caller to adapt behavior to backend capability (for
/// example, skipping timer-based profiling when [`Features::TIMERS`] is
/// absent). This layer performs no runtime fallback emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Features {
    bits: u32,
}

impl Features {
    /// No optional features.
    pub const NONE: Self = Self { bits: 0 };
    /// The backend supports GPU duration measurement via timers.
    pub const TIMERS: Self = Self { bits: 1 << 0 };
    /// The backend supports rendering into float-format textures.
    pub const FLOAT_RENDER_TARGETS: Self = Self { bits: 1 << 1 };

    /// Creates a feature set from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns `true` iff every bit in `required` is present in `self`.
    pub const fn has(&self, required: Self) -> bool {
        (self.bits & required.bits) == required.bits
    }

    /// Returns a new set combining the flags of both operands.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns `true` if no feature bit is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Static, queryable facts about a backend instance.
///
/// A `Caps` value is immutable and stable for the backend's lifetime;
/// callers query it once at startup to decide feature usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps {
    /// The set of optional abilities this backend supports.
    pub features: Features,
    /// The maximum width or height, in pixels, of a texture.
    pub max_texture_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_requires_every_bit() {
        let both = Features::TIMERS | Features::FLOAT_RENDER_TARGETS;

        assert!(both.has(Features::TIMERS));
        assert!(both.has(Features::FLOAT_RENDER_TARGETS));
        assert!(both.has(both));

        let timers_only = Features::TIMERS;
        assert!(timers_only.has(Features::TIMERS));
        assert!(!timers_only.has(Features::FLOAT_RENDER_TARGETS));
        assert!(!timers_only.has(both));
    }

    #[test]
    fn empty_set_has_only_none() {
        let none = Features::NONE;
        assert!(none.is_empty());
        assert!(none.has(Features::NONE));
        assert!(!none.has(Features::TIMERS));
    }

    #[test]
    fn bitor_assign_accumulates() {
        let mut features = Features::NONE;
        features |= Features::TIMERS;
        features |= Features::FLOAT_RENDER_TARGETS;
        assert_eq!(features.bits(), 0b11);
    }

    #[test]
    fn caps_are_a_plain_value() {
        let caps = Caps {
            features: Features::TIMERS,
            max_texture_size: 8192,
        };
        let copy = caps;
        assert_eq!(caps, copy);
        assert_eq!(copy.max_texture_size, 8192);
    }
}
