pub mod compose;
pub mod crop;
mod image_io;
mod options;
pub mod store;
mod types;

pub use compose::{ComposedPdf, compose_pdf, compose_pdf_bytes};
pub use crop::{crop, crop_decoded, crop_image};
pub use image_io::{
    LoadedImage, PREVIEW_MAX_EDGE, decode_image_file, encode_jpeg, load_image_file, make_preview,
    reencode_lossy,
};
pub use options::*;
pub use store::{AppliedCrop, ImageEntry, ImageStore};
pub use types::*;
