use crate::FanoutRb as Rb;

mod random;
mod registry;
mod scenario;
