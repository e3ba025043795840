//! Domain types for train diagrams.
//!
//! Validated value types shared by the timetable loader and the diagram
//! renderer. Types that can be invalid are checked at construction, so code
//! that receives them can trust their contents.

mod category;
mod clock;
mod color;
mod record;

pub use category::TrainCategory;
pub use clock::{ClockTime, MINUTES_PER_DAY, MalformedTimeError, parse_time_label};
pub use color::{Color, InvalidColor};
pub use record::{ScheduleRecord, StationDataset};
