//! Table generation — 1-D pair lists and 2-D matrices over stepped sweeps.

pub mod matrix;
pub mod one_d;

pub use matrix::{MatrixTableData, generate_matrix_table_data};
pub use one_d::{Table1D, generate_1d_table_data};
