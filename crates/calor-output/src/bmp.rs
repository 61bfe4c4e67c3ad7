//! Bitmap encoding and the on-disk snapshot writer.
//!
//! Grid row 0 is the top of the image. Pixels come from [`heat_colour`];
//! the file format is left to `image`.

use std::fs;
use std::path::{Path, PathBuf};

use calor_core::Step;
use calor_grid::Field;
use image::codecs::bmp::BmpEncoder;
use image::RgbImage;
use tracing::debug;

use crate::colour::heat_colour;
use crate::error::OutputError;
use crate::sink::SnapshotSink;

/// Render the interior of `field` through the heat ramp.
pub fn render_image(field: &Field) -> Result<RgbImage, OutputError> {
    let layout = field.layout();
    let (width, height) = (layout.width(), layout.height());
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(OutputError::TooLarge { width, height })?;
    Ok(RgbImage::from_fn(width, height, |x, y| {
        heat_colour(field.get(x as i32, y as i32))
    }))
}

/// Encode the interior of `field` as a complete 24-bit bitmap file.
pub fn encode_bmp(field: &Field) -> Result<Vec<u8>, OutputError> {
    let img = render_image(field)?;
    let mut out = Vec::new();
    img.write_with_encoder(BmpEncoder::new(&mut out))?;
    Ok(out)
}

/// Writes each snapshot to `dir/NNNN.bmp`, numbered by `step / interval`.
#[derive(Clone, Debug)]
pub struct BmpWriter {
    dir: PathBuf,
    snapshot_interval: u64,
    written: u64,
}

impl BmpWriter {
    /// Create `dir` if needed and return a writer into it.
    pub fn new(dir: impl Into<PathBuf>, snapshot_interval: u64) -> Result<Self, OutputError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| OutputError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            snapshot_interval: snapshot_interval.max(1),
            written: 0,
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a snapshot at `step` is written to.
    pub fn path_for(&self, step: Step) -> PathBuf {
        self.dir
            .join(format!("{:04}.bmp", step.0 / self.snapshot_interval))
    }

    /// Number of files written.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl SnapshotSink for BmpWriter {
    fn write_snapshot(&mut self, step: Step, field: &Field) -> Result<(), OutputError> {
        let bytes = encode_bmp(field)?;
        let path = self.path_for(step);
        fs::write(&path, bytes).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        self.written += 1;
        debug!(%step, path = %path.display(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calor_grid::Layout;
    use image::{ImageFormat, Rgb};

    #[test]
    fn top_row_of_the_image_is_grid_row_zero() {
        let mut f = Field::filled(Layout::global_temperature(3, 2).unwrap(), 0.0).unwrap();
        f.set(0, 0, 100.0);
        let img = image::load_from_memory_with_format(&encode_bmp(&f).unwrap(), ImageFormat::Bmp)
            .unwrap()
            .to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(1, 0), Rgb([0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 1), Rgb([0, 0, 255]));
    }

    #[test]
    fn margin_is_not_rendered() {
        let mut f = Field::filled(Layout::local_temperature(4, 3, 1).unwrap(), 40.0).unwrap();
        f.set(-1, -1, 100.0);
        let img = render_image(&f).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert!(img.pixels().all(|p| *p == heat_colour(40.0)));
    }

    #[test]
    fn writer_names_files_by_snapshot_index() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("frames");
        let mut w = BmpWriter::new(&dir, 500).unwrap();
        assert_eq!(w.path_for(Step(1500)), dir.join("0003.bmp"));

        let f = Field::filled(Layout::global_temperature(2, 2).unwrap(), 50.0).unwrap();
        w.write_snapshot(Step(0), &f).unwrap();
        w.write_snapshot(Step(500), &f).unwrap();
        assert_eq!(w.written(), 2);
        assert!(dir.join("0000.bmp").is_file());
        assert_eq!(fs::read(dir.join("0001.bmp")).unwrap(), encode_bmp(&f).unwrap());
    }
}
