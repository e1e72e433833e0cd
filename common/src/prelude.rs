pub use crate::{
    ext::{vector3_from_slice, ExtendVector3},
    pretty::PrettyPrint,
    rotation::RotationMatrix,
};
