pub mod network;
pub mod spec;

pub use network::{Network, ForwardPass};
pub use spec::{NetworkSpec, LayerSpec};
