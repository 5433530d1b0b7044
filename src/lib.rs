// Library interface for blueprint
// This allows integration tests to access internal modules

pub mod blueprint;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod message;
pub mod navigation;
pub mod survey;
pub mod writer;

// Re-export commonly used types
pub use blueprint::{
    FacetSelection, Priority, RecommendationResult, Size, SpaceType, Track, resolve,
};
pub use config::ContactConfig;
pub use errors::BlueprintError;
pub use message::{Channel, OutboundMessage};
