//! Footprint library directories (`<name>.pretty`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use kbd_footprint::Footprint;
use log::{debug, info, warn};

use crate::footprint_file::format_footprint;

pub const FOOTPRINT_EXTENSION: &str = "kicad_mod";

/// A KiCad footprint library rooted at `<out_dir>/<name>.pretty`.
#[derive(Debug, Clone)]
pub struct FootprintLibrary {
    name: String,
    dir: PathBuf,
    models_dir: Option<PathBuf>,
}

impl FootprintLibrary {
    pub fn new(out_dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let dir = out_dir.as_ref().join(format!("{name}.pretty"));
        Self {
            name,
            dir,
            models_dir: None,
        }
    }

    /// Directory searched for 3D model files referenced by footprints.
    pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
        self.models_dir = Some(models_dir.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn footprint_path(&self, footprint_name: &str) -> PathBuf {
        self.dir.join(format!("{footprint_name}.{FOOTPRINT_EXTENSION}"))
    }

    /// Write one footprint and copy the model files it references.
    ///
    /// Model paths are rewritten to point into this library before the file
    /// is written. Returns the path of the written file.
    pub fn write(&self, mut footprint: Footprint) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        for model in footprint.model_files() {
            self.copy_model(&model)?;
        }
        footprint.resolve_model_paths(&self.name);

        let path = self.footprint_path(footprint.name());
        let contents = format_footprint(&footprint);
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(contents.as_bytes())?;
                f.flush()
            })
            .map_err(|err| anyhow::anyhow!("Failed to write {}: {err}", path.display()))?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Write every footprint, in order.
    pub fn write_all(&self, footprints: impl IntoIterator<Item = Footprint>) -> Result<usize> {
        let mut count = 0;
        for footprint in footprints {
            self.write(footprint)?;
            count += 1;
        }
        info!("Wrote {count} footprint(s) to {}", self.dir.display());
        Ok(count)
    }

    /// Copy `relative` (e.g. `3dshapes/x.step`) from the models directory into
    /// the library, unless it is already there.
    fn copy_model(&self, relative: &Path) -> Result<()> {
        let dest = self.dir.join(relative);
        if dest.exists() {
            return Ok(());
        }

        let Some(models_dir) = &self.models_dir else {
            warn!(
                "No models directory configured, skipping {}",
                relative.display()
            );
            return Ok(());
        };

        let Some(file_name) = relative.file_name() else {
            bail!("Invalid model path {}", relative.display());
        };
        let src = models_dir.join(file_name);
        if !src.is_file() {
            bail!(
                "Model file {} not found in {}",
                Path::new(file_name).display(),
                models_dir.display()
            );
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(&src, &dest).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;
        info!("Copied {} to {}", src.display(), dest.display());
        Ok(())
    }
}
