// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Car silhouette compositing.
//!
//! The silhouette is drawn *behind* whatever the canvas already holds, so it
//! can arrive after the rest of the scene has been painted. A scene render
//! hands back a [`CarCompositeRequest`]; the host resolves the image in
//! whatever way suits it and passes the outcome to
//! [`CarCompositeRequest::complete`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use kurbo::{Rect, Size};
use png::{BitDepth, ColorType, Transformations};
use rigview_canvas::{
    Canvas, CanvasExt, Composite, DrawOp, ImageDesc, ImageQuality, ImageSampler, StateOp,
};

/// Decoded silhouette in straight-alpha RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct CarBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl fmt::Debug for CarBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarBitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

impl CarBitmap {
    /// Wraps straight-alpha RGBA8 pixels in row-major order.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CarImageError> {
        if width == 0 || height == 0 {
            return Err(CarImageError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CarImageError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes a PNG file held in memory.
    ///
    /// Palette, grayscale and RGB images are expanded; 16-bit channels are
    /// reduced to 8 bits.
    pub fn decode_png(data: &[u8]) -> Result<Self, CarImageError> {
        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(Transformations::ALPHA | Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let layout = reader.output_color_type();
        let mut buf = vec![0_u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let pixels = match layout {
            (ColorType::Rgba, BitDepth::Eight) => buf,
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            (color, depth) => {
                return Err(CarImageError::UnsupportedFormat { color, depth });
            }
        };
        Self::from_rgba8(info.width, info.height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Size as floating point.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Why a silhouette could not be produced.
#[derive(Debug)]
pub enum CarImageError {
    /// The image file could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The PNG stream is malformed.
    Png(png::DecodingError),
    /// The PNG decoded to a layout other than 8-bit RGBA or gray-alpha.
    UnsupportedFormat {
        /// Decoded color type.
        color: ColorType,
        /// Decoded bit depth.
        depth: BitDepth,
    },
    /// Pixel buffer length does not match the stated dimensions.
    SizeMismatch {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The image has no pixels.
    Empty,
}

impl fmt::Display for CarImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "failed to read car image {}", path.display()),
            Self::Png(_) => f.write_str("failed to decode car image"),
            Self::UnsupportedFormat { color, depth } => {
                write!(f, "unsupported car image layout {color:?}/{depth:?}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "car image has {actual} bytes, expected {expected}")
            }
            Self::Empty => f.write_str("car image is empty"),
        }
    }
}

impl std::error::Error for CarImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Png(source) => Some(source),
            _ => None,
        }
    }
}

impl From<png::DecodingError> for CarImageError {
    fn from(err: png::DecodingError) -> Self {
        Self::Png(err)
    }
}

/// Resolves an image reference to a bitmap.
pub trait CarImageSource {
    /// Loads the bitmap named by `reference`.
    fn load(&self, reference: &str) -> Result<CarBitmap, CarImageError>;
}

/// Reads PNG files relative to a root directory.
#[derive(Clone, Debug)]
pub struct DirectoryImageSource {
    root: PathBuf,
}

impl DirectoryImageSource {
    /// Creates a source reading below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CarImageSource for DirectoryImageSource {
    fn load(&self, reference: &str) -> Result<CarBitmap, CarImageError> {
        let path = self.root.join(reference);
        let data = std::fs::read(&path).map_err(|source| CarImageError::Io { path, source })?;
        CarBitmap::decode_png(&data)
    }
}

/// Largest rectangle with the image's aspect ratio that fits in `canvas`,
/// centered.
///
/// Returns an empty rectangle at the canvas center when the image has no
/// area.
pub fn fit_to_canvas(image: Size, canvas: Size) -> Rect {
    let center = canvas.to_rect().center();
    if image.width <= 0.0 || image.height <= 0.0 {
        return Rect::from_center_size(center, Size::ZERO);
    }
    let scale = (canvas.width / image.width).min(canvas.height / image.height);
    Rect::from_center_size(center, image * scale)
}

/// Draws `bitmap` fitted to the canvas, behind existing content.
///
/// The draw ignores the current transform and leaves the canvas state as
/// it found it. The uploaded image is released once drawn.
///
/// Sampling is nearest-neighbor so that opaque silhouettes stay fully
/// opaque when scaled.
pub fn composite_behind<C: Canvas + ?Sized>(canvas: &mut C, bitmap: &CarBitmap, opacity: f32) {
    let desc = ImageDesc::rgba8(bitmap.width, bitmap.height);
    let dst = fit_to_canvas(bitmap.size(), canvas.size());
    let image = canvas.create_image(desc, &bitmap.pixels);
    let sampler = ImageSampler::default().with_quality(ImageQuality::Low);
    canvas.with_saved(|c| {
        c.state(StateOp::ResetTransform);
        c.state(StateOp::SetGlobalAlpha(opacity));
        c.state(StateOp::SetComposite(Composite::DestinationOver));
        c.draw(DrawOp::DrawImage {
            image,
            dst,
            sampler,
        });
    });
    canvas.destroy_image(image);
}

/// Pending silhouette for a scene that has already been drawn.
///
/// Requests are independent: completing an older request after a newer
/// scene was rendered still composites behind the canvas as it is now.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "the car silhouette is only drawn once the request is completed"]
pub struct CarCompositeRequest {
    reference: &'static str,
    opacity: f32,
}

impl CarCompositeRequest {
    pub(crate) fn new(reference: &'static str, opacity: f32) -> Self {
        Self { reference, opacity }
    }

    /// Image reference to resolve.
    pub fn reference(&self) -> &'static str {
        self.reference
    }

    /// Opacity the silhouette is drawn with.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Composites the resolved image, or drops the silhouette on error.
    ///
    /// Returns `true` when something was drawn.
    pub fn complete<C: Canvas + ?Sized>(
        self,
        canvas: &mut C,
        image: Result<CarBitmap, CarImageError>,
    ) -> bool {
        match image {
            Ok(bitmap) => {
                composite_behind(canvas, &bitmap, self.opacity);
                true
            }
            Err(error) => {
                tracing::debug!(
                    reference = self.reference,
                    %error,
                    "car image unavailable; silhouette omitted"
                );
                false
            }
        }
    }

    /// Loads the image from `source` and completes the request.
    pub fn resolve<C, S>(self, canvas: &mut C, source: &S) -> bool
    where
        C: Canvas + ?Sized,
        S: CarImageSource + ?Sized,
    {
        let image = source.load(self.reference);
        self.complete(canvas, image)
    }
}
