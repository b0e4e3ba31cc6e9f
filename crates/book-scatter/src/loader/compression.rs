//! Compression detection for the source dataset.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xz2::read::XzDecoder;

/// How the source file is encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// LZMA/XZ container (`.xz`).
    Xz,
    /// Uncompressed text.
    None,
}

impl Compression {
    /// Pick the compression from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xz") => Self::Xz,
            _ => Self::None,
        }
    }

    /// Wrap an open file in the matching decoder.
    ///
    /// Concatenated `.xz` streams are decoded back to back as one text.
    pub fn reader(&self, file: File) -> Box<dyn Read> {
        let buffered = BufReader::new(file);
        match self {
            Self::Xz => Box::new(XzDecoder::new_multi_decoder(buffered)),
            Self::None => Box::new(buffered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            Compression::from_path(Path::new("GoodReads_100k_books.csv.xz")),
            Compression::Xz
        );
        assert_eq!(Compression::from_path(Path::new("books.CSV.XZ")), Compression::Xz);
        assert_eq!(Compression::from_path(Path::new("books.csv")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("books")), Compression::None);
    }
}
