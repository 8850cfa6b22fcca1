//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, InputReader)
//! but are themselves concrete structs, not traits.

mod plan;

pub use plan::{LeafEntry, PlanHistory, PlanReport, PlanService, PlanSource, PlanVersion};
