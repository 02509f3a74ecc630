use std::io;
use std::path::PathBuf;

/// Everything that can go wrong between opening the GIF and writing the
/// info record.
///
/// The entry point downgrades all of these to a printed `Error:` line and
/// a successful exit.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input file could not be read.
    #[error("failed to open {path}: {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The container or one of its frames failed to decode.
    #[error("failed to decode GIF: {0}")]
    Decode(#[source] image::ImageError),

    /// A frame could not be encoded and saved as BMP.
    #[error("failed to save frame {path}: {source}", path = .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A directory or the info record could not be written.
    #[error("failed to write {path}: {source}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A metadata field does not fit in an unsigned 16-bit integer.
    #[error("value {value} does not fit in a u16")]
    RangeOverflow { value: i64 },
}
