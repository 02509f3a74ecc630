use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ExtractError;

/// Name of the record file the firmware loader reads from the SD card.
pub const INFO_FILE_NAME: &str = "info.txt";

/// The fixed 6-byte record describing an extracted animation.
///
/// Layout, all little-endian: `[u16 fps x 100][u16 frame count][u16 frame
/// size]`. The frame size is filled in later by the firmware-side packer
/// and is always written as zero here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRecord {
    fps_scaled: u16,
    frame_count: u16,
    frame_size: u16,
}

impl InfoRecord {
    /// Builds the record from the computed frame rate and frame count.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::RangeOverflow`] when the scaled frame rate
    /// or the frame count does not fit in 16 bits.
    pub fn new(fps: f64, frame_count: usize) -> Result<Self, ExtractError> {
        // Truncation toward zero, matching what the loader expects.
        let scaled = (fps * 100.0) as i64;
        let fps_scaled =
            u16::try_from(scaled).map_err(|_| ExtractError::RangeOverflow { value: scaled })?;

        let frame_count = u16::try_from(frame_count).map_err(|_| ExtractError::RangeOverflow {
            value: frame_count as i64,
        })?;

        Ok(Self {
            fps_scaled,
            frame_count,
            frame_size: 0,
        })
    }

    /// The frame rate multiplied by 100.
    pub const fn fps_scaled(&self) -> u16 {
        self.fps_scaled
    }

    /// The number of BMP files written in the same run.
    pub const fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Placeholder for the per-frame byte size; always zero.
    pub const fn frame_size(&self) -> u16 {
        self.frame_size
    }

    pub fn to_bytes(self) -> [u8; 6] {
        let mut bytes = [0; 6];
        bytes[0..2].copy_from_slice(&self.fps_scaled.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.frame_count.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.frame_size.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 6]) -> Self {
        Self {
            fps_scaled: u16::from_le_bytes(bytes[0..2].try_into().unwrap()),
            frame_count: u16::from_le_bytes(bytes[2..4].try_into().unwrap()),
            frame_size: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
        }
    }

    /// Writes the raw record to `<metadata_dir>/info.txt`.
    pub fn write(self, metadata_dir: &Path) -> Result<(), ExtractError> {
        let path = metadata_dir.join(INFO_FILE_NAME);
        fs::write(&path, self.to_bytes()).map_err(|source| ExtractError::Write {
            path: path.clone(),
            source,
        })?;

        info!("wrote info record: {:#}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_layout_is_little_endian() {
        let record = InfoRecord::new(10.0, 3).unwrap();

        // 10 fps scales to 1000 = 0x03E8.
        assert_eq!(record.to_bytes(), [0xE8, 0x03, 0x03, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn scaling_truncates_toward_zero() {
        // 1000 / 67 ms = 14.925... fps.
        let record = InfoRecord::new(1000.0 / 67.0, 1).unwrap();
        assert_eq!(record.fps_scaled(), 1492);

        let record = InfoRecord::new(9.999, 1).unwrap();
        assert_eq!(record.fps_scaled(), 999);
    }

    #[test]
    fn placeholder_is_always_zero() {
        let record = InfoRecord::new(25.0, 42).unwrap();

        assert_eq!(record.frame_size(), 0);
        assert_eq!(&record.to_bytes()[4..6], &[0x00, 0x00]);
    }

    #[test]
    fn round_trips_through_bytes() {
        let record = InfoRecord::new(14.92, 513).unwrap();

        assert_eq!(InfoRecord::from_bytes(&record.to_bytes()), record);
    }

    #[test]
    fn rejects_values_outside_u16() {
        // 700 fps scales to 70000, past the u16 ceiling.
        let err = InfoRecord::new(700.0, 1).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::RangeOverflow { value: 70000 }
        ));

        let err = InfoRecord::new(10.0, 70000).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::RangeOverflow { value: 70000 }
        ));
    }
}
