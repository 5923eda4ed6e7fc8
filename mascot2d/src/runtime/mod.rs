mod actor;
mod reactor;
mod stage;
mod threshold;
mod throttle;

pub use actor::*;
pub use reactor::*;
pub use stage::*;
pub use threshold::*;
pub use throttle::*;


#[cfg(test)]
mod throttle_tests;



#[cfg(test)]
mod stage_tests;
