pub mod convert;
pub mod error;
pub mod har;
pub mod instantiate;
pub mod parse;

pub use convert::convert;
pub use har::{HarRequest, Param, PostData};
pub use parse::ApiDocument;
