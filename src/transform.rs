pub mod affine;
pub mod linear;
pub mod non_linear;
