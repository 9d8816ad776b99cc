mod activity;
mod event;
mod result;

pub use activity::{Activity, ActivityStatus, ActivityStep, ActivityType, DisableReason};
pub use event::Event;
pub use result::{Calculation, StepResult};
