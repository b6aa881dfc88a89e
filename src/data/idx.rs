//! Readers for the IDX binary format used by MNIST and its derivatives.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x03        (number of dimensions = 3)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   0x00 0x00 0x08 0x01
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, one class index each
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{RegressionError, Result};

const IMAGE_MAGIC: u32 = 0x0000_0803;
const LABEL_MAGIC: u32 = 0x0000_0801;

/// Decoded IDX3 image file. Pixels keep their raw 0–255 intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct IdxImages {
    pub rows: usize,
    pub cols: usize,
    pub images: Vec<Vec<f64>>,
}

/// Reads a whole file, gunzipping it when the name ends in `.gz`.
pub fn read_idx_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut bytes = Vec::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_end(&mut bytes)?;
    } else {
        let mut file = file;
        file.read_to_end(&mut bytes)?;
    }
    Ok(bytes)
}

fn header_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Parses an IDX3 image file, keeping at most `limit` images.
pub fn parse_idx_images(bytes: &[u8], limit: Option<usize>) -> Result<IdxImages> {
    if bytes.len() < 16 {
        return Err(RegressionError::InvalidIdx(format!(
            "image file too short: expected at least 16 header bytes, got {}",
            bytes.len()
        )));
    }
    let magic = header_u32(bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(RegressionError::InvalidIdx(format!(
            "image file magic number mismatch (got {:#010x})",
            magic
        )));
    }

    let n_items = header_u32(bytes, 4) as usize;
    let rows = header_u32(bytes, 8) as usize;
    let cols = header_u32(bytes, 12) as usize;
    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        RegressionError::InvalidIdx(format!("rows * cols overflows (rows={}, cols={})", rows, cols))
    })?;

    let n_take = limit.map_or(n_items, |l| l.min(n_items));
    let needed = n_take
        .checked_mul(n_pixels)
        .and_then(|len| len.checked_add(16))
        .ok_or_else(|| RegressionError::InvalidIdx("image data length overflows".to_owned()))?;
    if bytes.len() < needed {
        return Err(RegressionError::InvalidIdx(format!(
            "image file too short: {} images of {}x{} need {} bytes, file has {}",
            n_take, rows, cols, needed, bytes.len()
        )));
    }

    let images = if n_pixels == 0 {
        vec![Vec::new(); n_take]
    } else {
        bytes[16..needed]
            .chunks_exact(n_pixels)
            .map(|chunk| chunk.iter().map(|&px| px as f64).collect())
            .collect()
    };

    Ok(IdxImages { rows, cols, images })
}

/// Parses an IDX1 label file, keeping at most `limit` labels.
pub fn parse_idx_labels(bytes: &[u8], limit: Option<usize>) -> Result<Vec<u8>> {
    if bytes.len() < 8 {
        return Err(RegressionError::InvalidIdx(format!(
            "label file too short: expected at least 8 header bytes, got {}",
            bytes.len()
        )));
    }
    let magic = header_u32(bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(RegressionError::InvalidIdx(format!(
            "label file magic number mismatch (got {:#010x})",
            magic
        )));
    }

    let n_items = header_u32(bytes, 4) as usize;
    let n_take = limit.map_or(n_items, |l| l.min(n_items));
    if bytes.len() < 8 + n_take {
        return Err(RegressionError::InvalidIdx(format!(
            "label file too short: {} labels need {} bytes, file has {}",
            n_take, 8 + n_take, bytes.len()
        )));
    }

    Ok(bytes[8..8 + n_take].to_vec())
}
