mod logger;
pub use logger::*;

mod clock;
pub use clock::{WALL_CLOCK_FORMAT, format_wall_clock, local_now};
