//! Input classification and processor selection.

mod classifier;
mod dispatcher;

pub use classifier::{classify, Classification};
pub use dispatcher::{select, Processor};
