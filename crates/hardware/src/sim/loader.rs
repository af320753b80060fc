//! Image loader.
//!
//! This module reads memory images from disk. It performs:
//! 1. **Raw images:** Files of little-endian 64-bit cells, as written by `write_image_file`.
//! 2. **Assembly:** `.s` / `.asm` source files, assembled and padded to whole cells.
//! 3. **Writing:** Serializing an image back to the raw cell format.

use std::fs;
use std::path::Path;

use crate::common::constants::CELL_BYTES;
use crate::common::error::ImageError;
use crate::isa::asm::assemble_image;

/// Reads a file from disk into a byte vector.
///
/// # Errors
///
/// Returns [`ImageError::Io`] if the file cannot be read.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, ImageError> {
    fs::read(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits raw bytes into little-endian 64-bit cells.
///
/// # Errors
///
/// Returns [`ImageError::Truncated`] if the length is not a multiple of 8.
pub fn cells_from_bytes(path: &Path, bytes: &[u8]) -> Result<Vec<u64>, ImageError> {
    let chunks = bytes.chunks_exact(CELL_BYTES as usize);
    if !chunks.remainder().is_empty() {
        return Err(ImageError::Truncated {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }
    Ok(chunks
        .map(|chunk| {
            let mut cell = [0u8; 8];
            cell.copy_from_slice(chunk);
            u64::from_le_bytes(cell)
        })
        .collect())
}

/// Serializes cells as little-endian bytes.
pub fn image_to_bytes(cells: &[u64]) -> Vec<u8> {
    cells.iter().flat_map(|cell| cell.to_le_bytes()).collect()
}

/// Reads a raw image file of 64-bit cells.
///
/// # Errors
///
/// Returns [`ImageError::Io`] if the file cannot be read and [`ImageError::Truncated`] if
/// it is not a whole number of cells.
pub fn load_image_file(path: &Path) -> Result<Vec<u64>, ImageError> {
    let bytes = load_binary(path)?;
    cells_from_bytes(path, &bytes)
}

/// Returns `true` if `path` names an assembly source file.
pub fn is_assembly(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("s") || ext.eq_ignore_ascii_case("asm"))
}

/// Reads a program, assembling it first if it is an assembly source file.
///
/// # Errors
///
/// Returns [`ImageError::Io`] on read failure, [`ImageError::Asm`] for assembly errors,
/// and [`ImageError::Truncated`] for a malformed raw image.
pub fn load_program_file(path: &Path) -> Result<Vec<u64>, ImageError> {
    if is_assembly(path) {
        let src = fs::read_to_string(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(assemble_image(&src)?)
    } else {
        load_image_file(path)
    }
}

/// Writes an image as a raw file of little-endian cells.
///
/// # Errors
///
/// Returns [`ImageError::Io`] if the file cannot be written.
pub fn write_image_file(path: &Path, cells: &[u64]) -> Result<(), ImageError> {
    fs::write(path, image_to_bytes(cells)).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
