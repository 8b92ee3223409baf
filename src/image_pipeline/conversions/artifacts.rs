use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Output produced by a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Demosaiced color image
    Reconstruction,
    /// Single-channel sensor capture
    MosaicMono,
    /// False-color mosaic (sampled channel kept, others zero)
    Mosaic,
    /// Reference minus reconstruction, centred on 127
    Difference,
}

impl Artifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Reconstruction => "debayered.tif",
            Self::MosaicMono => "mosaic_mono.tif",
            Self::Mosaic => "mosaic.tif",
            Self::Difference => "difference.tif",
        }
    }
}

/// Destination for pipeline artifacts.
pub trait ArtifactSink {
    fn create(&mut self, artifact: Artifact) -> Result<Box<dyn Write + '_>>;
}

/// Writes each artifact to its own file inside a directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConversionError::OutputWriteError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }
}

impl ArtifactSink for DirectorySink {
    fn create(&mut self, artifact: Artifact) -> Result<Box<dyn Write + '_>> {
        let path = self.path_of(artifact);
        let file = File::create(&path)
            .map_err(|e| ConversionError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub buffers: HashMap<Artifact, Vec<u8>>,
}

impl ArtifactSink for MemorySink {
    fn create(&mut self, artifact: Artifact) -> Result<Box<dyn Write + '_>> {
        let buffer = self.buffers.entry(artifact).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }
}
