pub mod batch;
pub mod convert;
pub mod error;
pub mod inspect;
pub mod io;
pub mod locate;
pub mod model;
pub mod normalize;

pub use error::{ConvertError, Result};
