pub mod f32;
pub mod io;
pub mod traits;
pub mod u16;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, Rows};
pub use self::u16::ImageU16;
