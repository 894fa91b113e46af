pub mod generate_reel;
pub mod image_sourcing;
pub mod script_generator;

pub use generate_reel::{GenerateReelService, PipelineConfig};
pub use image_sourcing::{ImageSourcer, SourcingContext, SourcingError, SourcingTier};
pub use script_generator::ScriptGenerator;
