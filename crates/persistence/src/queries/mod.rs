// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function takes a plain `SqliteConnection` so it can run either
//! standalone or inside the transaction of a mutation.

pub mod classes;
pub mod holidays;
pub mod rotation;
pub mod students;
pub mod teachers;

pub use classes::{find_class_id_by_name, list_classes, require_class};
pub use holidays::list_holidays;
pub use rotation::get_rotation;
pub use students::{list_students, username_owner};
pub use teachers::{find_missing_teacher, list_teachers};
