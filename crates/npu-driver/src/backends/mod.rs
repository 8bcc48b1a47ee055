//! NPU backend implementations
//!
//! Every backend runs on the software cmodel; there is no hardware path.
//! - **cmodel**: the shared instruction executor
//! - **chips**: one strategy per variant (interrupt and EOD conventions,
//!   bf16 availability) wrapped around the executor

pub mod chips;
pub mod cmodel;

pub use chips::{
    Bm1880v2Backend, CModelBackend, Cv180xBackend, Cv181xBackend, Cv182xBackend, Cv183xBackend, Strategy,
    StreamLayout,
};
pub use cmodel::CModel;
