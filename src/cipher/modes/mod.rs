mod ctr;
mod util;

pub use ctr::CounterMode;
