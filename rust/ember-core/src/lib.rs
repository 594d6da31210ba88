//! Ember Core
//!
//! The runtime object model shared by the interpreter and the builtin library:
//! values, operand coercion, the builtin calling convention, and futures.

pub mod builtin;
pub mod coerce;
pub mod error;
pub mod future;
pub mod values;

pub use builtin::{Args, Arity, Builtin, NativeFn};
pub use coerce::{coerce, BinaryOp, Coerced};
pub use error::BuiltinError;
pub use future::{deferred, DeliveryError, FutureHandle, Promise};
pub use values::{Value, ValueType};
