pub mod feasibility;
pub mod model;
pub mod options;
pub mod report;
pub mod state;
