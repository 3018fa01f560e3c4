//! Spiral torsion spring model and design optimization core.
//!
//! Stage 1: closed-form model, search bounds
//! Stage 2: constraints, objective, optimizer contract
//! Stage 3: problem assembly, design record, response surfaces

pub mod bounds;
pub mod constraints;
pub mod design;
pub mod model;
pub mod objective;
pub mod optimizer;
pub mod pipeline;
pub mod problem;
pub mod surface;
