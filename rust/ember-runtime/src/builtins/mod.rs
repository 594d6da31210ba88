//! Builtin implementations, grouped by the kind of value they operate on.
//!
//! Each submodule exposes a `BUILTINS` table; [`all`] chains them for the
//! registry.

pub mod async_ops;
pub mod convert;
pub mod io;
pub mod lists;
pub mod maps;
pub mod math;
pub mod strings;
pub mod util;

use ember_core::Builtin;

/// Every builtin shipped with the runtime, including aliases.
pub fn all() -> impl Iterator<Item = &'static Builtin> {
    strings::BUILTINS
        .iter()
        .chain(lists::BUILTINS)
        .chain(maps::BUILTINS)
        .chain(convert::BUILTINS)
        .chain(math::BUILTINS)
        .chain(io::BUILTINS)
        .chain(util::BUILTINS)
        .chain(async_ops::BUILTINS)
}
