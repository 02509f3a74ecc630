//! Decode an animated GIF and write its frames out as 24-bit BMP files.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder as _, Delay, DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ExtractError;
use crate::metadata::InfoRecord;

/// Frame display duration assumed when the container does not advertise one.
const DEFAULT_FRAME_DURATION_MS: f64 = 100.0;

/// Frame rate assumed when no frame delay can be read at all.
const DEFAULT_FPS: f64 = 10.0;

/// The outcome of a successful extraction run.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub frame_count: usize,
    pub fps: f64,
}

/// Extracts every frame of the GIF at `path` into `config.output_dir()`,
/// then writes the loader's info record into `config.metadata_dir()`.
///
/// Frames are numbered from zero (`frame_0000.bmp`, `frame_0001.bmp`, ...)
/// and converted to three-channel RGB before encoding. Frames already on
/// disk when a later step fails are not removed.
///
/// # Errors
///
/// Returns an [`ExtractError`] naming the step that failed: opening the
/// file, decoding a frame, saving a frame, or writing the info record.
pub fn extract_frames(path: &Path, config: &Config) -> Result<Summary, ExtractError> {
    create_dir(config.output_dir())?;
    create_dir(config.metadata_dir())?;

    let file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_owned(),
        source,
    })?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(ExtractError::Decode)?;

    let mut frame_count = 0usize;
    let mut first_delay: Option<Delay> = None;

    // `into_frames` hands back a lazy iterator; each step decodes the frame
    // under the cursor and the sequence ends when the container runs out of
    // image data. There is no upper bound on the frame count here.
    for result in decoder.into_frames() {
        let frame = result.map_err(ExtractError::Decode)?;

        if first_delay.is_none() {
            first_delay = Some(frame.delay());
        }

        let frame_path = config
            .output_dir()
            .join(format!("frame_{frame_count:04}.bmp"));
        let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).into_rgb8();
        rgb.save_with_format(&frame_path, ImageFormat::Bmp)
            .map_err(|source| ExtractError::Save {
                path: frame_path.clone(),
                source,
            })?;

        debug!("saved frame: {:#}", frame_path.display());
        frame_count += 1;
    }

    let fps = frame_rate(first_delay);

    println!(
        "Extracted {frame_count} frames to {}/",
        config.output_dir().display()
    );
    println!("Frame rate: {fps:.2} fps");
    println!("Total frames: {frame_count}");

    let record = InfoRecord::new(fps, frame_count)?;
    record.write(config.metadata_dir())?;

    Ok(Summary { frame_count, fps })
}

fn create_dir(path: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(path).map_err(|source| ExtractError::Write {
        path: path.to_owned(),
        source,
    })?;

    info!("created directory: {:#}", path.display());
    Ok(())
}

/// Derives the playback rate from the first frame's advertised delay.
///
/// GIFs that do not advertise a delay report zero; those get the
/// conventional 100 ms per frame. An animation with no frames at all gets
/// a flat 10 fps.
fn frame_rate(first_delay: Option<Delay>) -> f64 {
    let Some(delay) = first_delay else {
        return DEFAULT_FPS;
    };

    let (numer, denom) = delay.numer_denom_ms();
    let duration_ms = if numer == 0 || denom == 0 {
        DEFAULT_FRAME_DURATION_MS
    } else {
        f64::from(numer) / f64::from(denom)
    };

    1000.0 / duration_ms
}
