pub mod guide_config;
pub mod tools;
pub mod tour_guide;

pub use guide_config::GuideConfig;
pub use tools::{CreateTourArgs, ToolCall, ToolDefinition, ToolName};
pub use tour_guide::{ToolContext, ToolError, ToolOutcome, TourGuide};
