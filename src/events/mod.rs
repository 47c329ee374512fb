//! Event data: handler arguments and observer records.
//!
//! ## Contents
//! - [`Value`], [`ArgsExt`] positional arguments forwarded by `publish`
//! - [`DispatchKind`], [`DispatchEvent`] records of bus activity for observers

mod dispatch;
mod value;

pub use dispatch::{DispatchEvent, DispatchKind};
pub use value::{ArgsExt, Value};
