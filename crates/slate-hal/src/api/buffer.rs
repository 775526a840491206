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

//! GPU buffer usage kinds.

/// The usage kind a buffer is created with.
///
/// The kind is fixed at creation and tells the backend which binding target
/// the buffer belongs to. The driver may use it to place the buffer in the
/// most suitable memory type and to validate binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// The buffer holds index data for indexed draws.
    Index,
    /// The buffer holds vertex or uniform data.
    Data,
}
