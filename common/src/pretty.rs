use crate::rotation::RotationMatrix;
use nalgebra::{Vector2, Vector3};
use std::fmt::{self, Formatter};

/// Compact renderings for log lines. nalgebra's own `Display` prints a
/// multi-line matrix, which is unreadable in a log.
pub trait PrettyPrint {
    type PrettyPrinter: fmt::Display;
    fn pretty(&self) -> Self::PrettyPrinter;
}

impl PrettyPrint for Vector2<f32> {
    type PrettyPrinter = Vector2PrettyPrinter;

    fn pretty(&self) -> Self::PrettyPrinter {
        Self::PrettyPrinter { data: *self }
    }
}

pub struct Vector2PrettyPrinter {
    data: Vector2<f32>,
}

impl fmt::Display for Vector2PrettyPrinter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "({:.0}, {:.0})", self.data.x, self.data.y)
    }
}

impl PrettyPrint for Vector3<f32> {
    type PrettyPrinter = Vector3PrettyPrinter;

    fn pretty(&self) -> Self::PrettyPrinter {
        Self::PrettyPrinter { data: *self }
    }
}

pub struct Vector3PrettyPrinter {
    data: Vector3<f32>,
}

impl fmt::Display for Vector3PrettyPrinter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "({:.0}, {:.0}, {:.0})",
            self.data.x, self.data.y, self.data.z,
        )
    }
}

impl PrettyPrint for RotationMatrix {
    type PrettyPrinter = RotationMatrixPrettyPrinter;

    fn pretty(&self) -> Self::PrettyPrinter {
        Self::PrettyPrinter {
            forward: self.forward(),
        }
    }
}

pub struct RotationMatrixPrettyPrinter {
    forward: Vector3<f32>,
}

impl fmt::Display for RotationMatrixPrettyPrinter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "@({:.2}, {:.2}, {:.2})",
            self.forward.x, self.forward.y, self.forward.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{pretty::PrettyPrint, rotation::RotationMatrix};
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn vectors() {
        assert_eq!(Vector2::new(1.4_f32, -2.6).pretty().to_string(), "(1, -3)");
        assert_eq!(
            Vector3::new(4096.0_f32, 0.2, 17.01).pretty().to_string(),
            "(4096, 0, 17)",
        );
    }

    #[test]
    fn rotation() {
        let m = RotationMatrix::from_unreal_angles(0.0, 0.0, 0.0);
        assert_eq!(m.pretty().to_string(), "@(1.00, 0.00, 0.00)");
    }
}
