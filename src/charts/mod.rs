//! Chart aggregation.
//!
//! Pure functions mapping the current control selection and the static
//! dataset to renderable chart specifications. Nothing here holds state:
//! every chart is recomputed from scratch on each call, and identical
//! inputs always produce identical output.

pub mod pie;
pub mod scatter;

pub use pie::success_pie;
pub use scatter::payload_scatter;
