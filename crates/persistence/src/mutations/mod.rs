// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Multi-statement mutations open an immediate transaction so that the
//! write lock is taken before any precondition is read. A failure at any
//! point rolls the whole operation back.
//!
//! ## Module Organization
//!
//! - `admin`: Teacher, class, student and holiday inserts
//! - `rotation`: Full-state rotation replacement
//! - `merge`: Combining two classes into a new one

pub mod admin;
pub mod merge;
pub mod rotation;

pub use admin::{add_student, create_class, create_holiday, create_teacher};
pub use merge::combine_classes;
pub use rotation::replace_rotation;
