pub mod f32;
pub mod io;
pub mod mask;
pub mod rgb8;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::mask::BinaryMask;
pub use self::rgb8::{ImageRgb8, Rgb8, RgbImageU8};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};
