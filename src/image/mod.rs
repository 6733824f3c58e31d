//! Single-channel image buffers and decode/encode helpers.
//!
//! `ImageU8` borrows 8-bit grayscale bytes, `ImageF32` owns a float plane used
//! by every signal computation. Both expose rows through `ImageView`.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::{GrayImageU8, LoadedImage};
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::ImageU8;
