use std::fs;
use std::path::Path;
use serde::Deserialize;
use tracing::info;

use crate::error::SlideshowError;
use crate::resources::{load_sorted_image_paths, ResourceBundle};

/// One paged unit: an image and its optional narration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlideRecord {
    #[serde(rename = "image")]
    pub image_id: String,
    #[serde(rename = "audio", default)]
    pub audio_id: Option<String>,
}

impl SlideRecord {
    pub fn new(image_id: &str, audio_id: Option<&str>) -> Self {
        Self {
            image_id: image_id.to_string(),
            audio_id: audio_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    slides: Vec<SlideRecord>,
}

/// The ordered, read-only list of slides.
#[derive(Debug, Clone)]
pub struct SlideCatalog {
    records: Vec<SlideRecord>,
}

impl SlideCatalog {
    pub fn new(records: Vec<SlideRecord>) -> Self {
        Self { records }
    }

    /// Uses `slides.yaml` from the bundle when present, otherwise pairs every
    /// image in the bundle with a same-named audio file.
    pub fn load(bundle: &ResourceBundle) -> Result<Self, SlideshowError> {
        let manifest = bundle.manifest_path();
        let catalog = if manifest.is_file() {
            Self::from_manifest(&manifest)?
        } else {
            Self::from_directory(bundle)?
        };
        if catalog.records.is_empty() {
            return Err(SlideshowError::EmptyCatalog(bundle.root().to_path_buf()));
        }
        Ok(catalog)
    }

    pub fn from_manifest(path: &Path) -> Result<Self, SlideshowError> {
        let contents = fs::read_to_string(path)?;
        let manifest: Manifest = serde_yml::from_str(&contents)
            .map_err(|source| SlideshowError::Manifest { path: path.to_path_buf(), source })?;
        info!(path = ?path, slides = manifest.slides.len(), "Loaded slide manifest.");
        Ok(Self::new(manifest.slides))
    }

    pub fn from_directory(bundle: &ResourceBundle) -> Result<Self, SlideshowError> {
        let records: Vec<SlideRecord> = load_sorted_image_paths(bundle.root())?
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(|stem| {
                let audio = bundle.resolve_audio(stem).ok().map(|_| stem);
                SlideRecord::new(stem, audio)
            })
            .collect();
        info!(dir = ?bundle.root(), slides = records.len(), "Scanned slides from directory.");
        Ok(Self::new(records))
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn record_at(&self, index: usize) -> Result<&SlideRecord, SlideshowError> {
        self.records
            .get(index)
            .ok_or(SlideshowError::IndexOutOfRange { index, count: self.records.len() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideRecord> {
        self.records.iter()
    }

    /// The "Slide N of M" indicator text for a zero-based index.
    pub fn label(&self, index: usize) -> String {
        format!("Slide {} of {}", index + 1, self.count())
    }
}
