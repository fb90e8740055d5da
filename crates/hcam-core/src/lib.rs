pub mod consts;
pub mod error;
pub mod estimate;
pub mod instrument;
pub mod photometry;
pub mod sweep;
pub mod timing;
