use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};

use crate::constants::*;
use crate::error::{ResourceKind, SlideshowError};

/// The packaged resources of one slideshow: a directory holding images,
/// narration tracks and an optional manifest.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
    audio_extension: String,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>, audio_extension: &str) -> Self {
        Self {
            root: root.into(),
            audio_extension: audio_extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `<id>.<audio-extension>` inside the bundle.
    pub fn resolve_audio(&self, id: &str) -> Result<PathBuf, SlideshowError> {
        let path = self.root.join(format!("{}.{}", id, self.audio_extension));
        if path.is_file() {
            Ok(path)
        } else {
            Err(SlideshowError::ResourceNotFound { kind: ResourceKind::Audio, id: id.to_string() })
        }
    }

    /// Resolves an image by identifier, trying each known image extension.
    /// An identifier that already carries an extension is taken as is.
    pub fn resolve_image(&self, id: &str) -> Result<PathBuf, SlideshowError> {
        let direct = self.root.join(id);
        if direct.is_file() && has_image_extension(&direct) {
            return Ok(direct);
        }
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", id, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| SlideshowError::ResourceNotFound { kind: ResourceKind::Image, id: id.to_string() })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, SlideshowError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, SlideshowError> {
    let load_error = |reason: String| SlideshowError::ImageLoad { path: image_path.to_path_buf(), reason };

    let file_bytes = fs::read(image_path).map_err(|e| load_error(e.to_string()))?;
    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // EXIF orientation is only read reliably from JPEG containers
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| load_error(e.to_string()))?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW.
    // Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = ?image_path, orientation, "Applied EXIF rotation.");
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| load_error(e.to_string()))?;

    // Release the CPU copy of the pixels
    drop(image);

    Ok(texture)
}

fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            warn!(path = ?image_path, err = %e, "Could not read EXIF data, keeping orientation.");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn bundle_with(files: &[&str]) -> (tempfile::TempDir, ResourceBundle) {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in files {
            File::create(dir.path().join(name)).expect("create fixture");
        }
        let bundle = ResourceBundle::new(dir.path(), "mp3");
        (dir, bundle)
    }

    #[test]
    fn resolves_audio_by_conventional_name() {
        let (dir, bundle) = bundle_with(&["s1.mp3", "s2.wav"]);
        assert_eq!(bundle.resolve_audio("s1").unwrap(), dir.path().join("s1.mp3"));
        assert!(matches!(
            bundle.resolve_audio("s2"),
            Err(SlideshowError::ResourceNotFound { kind: ResourceKind::Audio, .. })
        ));
    }

    #[test]
    fn audio_extension_is_normalized() {
        let (dir, _) = bundle_with(&["intro.ogg"]);
        let bundle = ResourceBundle::new(dir.path(), ".OGG");
        assert!(bundle.resolve_audio("intro").is_ok());
    }

    #[test]
    fn resolves_image_with_any_known_extension() {
        let (dir, bundle) = bundle_with(&["s1L.jpeg", "s2L.png", "notes.txt"]);
        assert_eq!(bundle.resolve_image("s1L").unwrap(), dir.path().join("s1L.jpeg"));
        assert_eq!(bundle.resolve_image("s2L.png").unwrap(), dir.path().join("s2L.png"));
        assert!(matches!(
            bundle.resolve_image("notes"),
            Err(SlideshowError::ResourceNotFound { kind: ResourceKind::Image, .. })
        ));
    }

    #[test]
    fn image_paths_are_filtered_and_sorted() {
        let (dir, _) = bundle_with(&["b.PNG", "a.jpg", "c.mp3", "slides.yaml"]);
        let paths = load_sorted_image_paths(dir.path()).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
    }
}
