//! Data model: input tables, prior knowledge, and fitted structures.

pub mod adjacency;
pub mod causal_order;
pub mod data_matrix;
pub mod lingam_model;
pub mod method;
pub mod prior_knowledge;

pub use adjacency::{AdjacencyMatrix, Edge};
pub use causal_order::CausalOrder;
pub use data_matrix::{CsvOptions, DataMatrix};
pub use lingam_model::LingamModel;
pub use method::{IcaFunction, Measure, Method};
pub use prior_knowledge::{Knowledge, PriorKnowledge, PriorKnowledgeBuilder};
