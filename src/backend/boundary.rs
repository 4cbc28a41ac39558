//! Boundary treatment used when padding fields for stencils.

use serde::{Deserialize, Serialize};

use crate::types::Convention;

/// Boundary treatment along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisBoundary {
    /// Wrap around.
    Periodic,
    /// Prescribed values on boundary nodes that were trimmed off the field.
    ///
    /// The padding layer adjacent to the field holds the boundary value `g`;
    /// layers further out are odd reflections `2g - u` through the boundary
    /// node.
    Dirichlet { low: f64, high: f64 },
}

/// Boundary treatment for all three axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec {
    pub axes: [AxisBoundary; 3],
}

impl BoundarySpec {
    /// Periodic along every axis.
    pub fn periodic() -> Self {
        Self {
            axes: [AxisBoundary::Periodic; 3],
        }
    }

    /// Boundary treatment implied by a grid convention.
    ///
    /// `cell_center` grids are periodic. `staggered_x` grids carry boundary
    /// nodes along x with the given values and are periodic along y and z.
    pub fn for_convention(convention: Convention, dirichlet_x: (f64, f64)) -> Self {
        match convention {
            Convention::CellCenter => Self::periodic(),
            Convention::StaggeredX => Self {
                axes: [
                    AxisBoundary::Dirichlet {
                        low: dirichlet_x.0,
                        high: dirichlet_x.1,
                    },
                    AxisBoundary::Periodic,
                    AxisBoundary::Periodic,
                ],
            },
        }
    }
}

impl Default for BoundarySpec {
    fn default() -> Self {
        Self::periodic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_convention() {
        assert_eq!(
            BoundarySpec::for_convention(Convention::CellCenter, (1.0, 2.0)),
            BoundarySpec::periodic()
        );

        let bc = BoundarySpec::for_convention(Convention::StaggeredX, (1.0, 2.0));
        assert_eq!(
            bc.axes[0],
            AxisBoundary::Dirichlet {
                low: 1.0,
                high: 2.0
            }
        );
        assert_eq!(bc.axes[1], AxisBoundary::Periodic);
        assert_eq!(bc.axes[2], AxisBoundary::Periodic);
    }
}
