//! Dense linear algebra on `f64` matrices
//!
//! - [`lu`]: LU factorization with partial pivoting
//! - [`det`]: determinant, with snapping of floating-point residue
//! - [`solve`]: `A·X = B` by forward and back substitution
//! - [`inv`]: inverse, size-gated towards the accelerated backend
//! - [`products`]: `mtimes`, `mldivide`, `mrdivide`

pub mod det;
pub mod inv;
pub mod lu;
pub mod products;
pub mod solve;

pub use det::{det, is_singular};
pub use inv::inv;
pub use lu::{LuDecomposition, lu};
pub use products::{mldivide, mrdivide, mtimes};
pub use solve::linsolve;
