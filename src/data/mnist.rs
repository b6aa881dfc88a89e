use std::path::{Path, PathBuf};

use log::info;

use crate::data::encoding::one_hot;
use crate::data::idx::{parse_idx_images, parse_idx_labels, read_idx_file};
use crate::error::{RegressionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    Train,
    Test,
}

impl SplitKind {
    fn stems(&self) -> (&'static str, &'static str) {
        match self {
            SplitKind::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
            SplitKind::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
        }
    }
}

/// One MNIST split: flattened raw pixel rows and their integer labels.
#[derive(Debug, Clone)]
pub struct MnistSplit {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl MnistSplit {
    /// Loads the standard MNIST file pair for `kind` from `dir`, accepting
    /// either the plain or the `.gz` file names. At most `limit` samples are
    /// kept.
    pub fn load(dir: &Path, kind: SplitKind, limit: Option<usize>) -> Result<MnistSplit> {
        let (image_stem, label_stem) = kind.stems();
        let image_bytes = read_idx_file(&locate(dir, image_stem)?)?;
        let label_bytes = read_idx_file(&locate(dir, label_stem)?)?;

        let images = parse_idx_images(&image_bytes, limit)?;
        let labels = parse_idx_labels(&label_bytes, limit)?;
        if images.images.len() != labels.len() {
            return Err(RegressionError::shape(
                format!("{} labels", images.images.len()),
                format!("{} labels", labels.len()),
            ));
        }

        info!(
            "loaded {} {:?} samples of {}x{} pixels from {}",
            labels.len(), kind, images.rows, images.cols, dir.display()
        );
        Ok(MnistSplit { features: images.images, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels as one-hot rows of length `n_classes`.
    pub fn one_hot_labels(&self, n_classes: usize) -> Result<Vec<Vec<f64>>> {
        one_hot(&self.labels, n_classes)
    }
}

fn locate(dir: &Path, stem: &str) -> Result<PathBuf> {
    let plain = dir.join(stem);
    if plain.exists() {
        return Ok(plain);
    }
    let gz = dir.join(format!("{}.gz", stem));
    if gz.exists() {
        return Ok(gz);
    }
    Err(RegressionError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("neither {} nor {} exists", plain.display(), gz.display()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::idx::tests::{image_file, label_file};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ferrite-logreg-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_plain_and_gzipped_files() {
        let dir = scratch_dir("mnist");
        let images = image_file(2, 2, &[vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![0, 0, 0, 0]]);
        std::fs::write(dir.join("train-images-idx3-ubyte"), &images).unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&label_file(&[3, 1, 4])).unwrap();
        std::fs::write(dir.join("train-labels-idx1-ubyte.gz"), encoder.finish().unwrap()).unwrap();

        let split = MnistSplit::load(&dir, SplitKind::Train, Some(2)).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(split.len(), 2);
        assert_eq!(split.features[1], vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(split.labels, vec![3, 1]);
        assert_eq!(split.one_hot_labels(10).unwrap()[0][3], 1.0);
    }

    #[test]
    fn test_missing_files() {
        let dir = scratch_dir("missing");
        let result = MnistSplit::load(&dir, SplitKind::Test, None);
        std::fs::remove_dir_all(&dir).ok();
        assert!(matches!(result, Err(RegressionError::Io(_))));
    }
}
