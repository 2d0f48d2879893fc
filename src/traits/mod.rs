pub mod observer;
mod utils;

pub use observer::{DelegateObserver, Observer};
pub use utils::Based;
