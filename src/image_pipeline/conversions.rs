//! Pipeline conversions module
//!
//! This module contains orchestration logic that wires readers, the Bayer core
//! and TIFF writers together.

mod artifacts;
mod checks;
mod raw_to_tiff;
mod simulate;
mod timing;


pub use artifacts::{Artifact, ArtifactSink, DirectorySink, MemorySink};
pub use raw_to_tiff::RawToTiffPipeline;
pub use simulate::{SimulationPipeline, SimulationReport};
pub use timing::{PipelineTimings, StepTiming, Timer};
