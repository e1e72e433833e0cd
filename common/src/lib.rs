#![warn(future_incompatible, rust_2018_compatibility, rust_2018_idioms, unused)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub use crate::{
    error::Error,
    pretty::PrettyPrint,
    rotation::{local_angular_velocity, RotationMatrix},
};

pub mod error;
pub mod ext;
pub mod math;
pub mod packet;
pub mod prelude;
mod pretty;
pub mod rotation;
