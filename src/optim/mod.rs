pub mod sgd;

pub use sgd::{Sgd, sgd_update, DEFAULT_LEARNING_RATE};
