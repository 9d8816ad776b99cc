mod dispatcher;
mod error;
mod explore;
mod fetch;
mod hunt;
mod pipeline;
mod quiz;
mod race;
mod strategy;
mod throttle;

pub use dispatcher::Calculator;
pub use error::CalculateError;
pub use fetch::{collect_observations, FetchOutcome};
pub use pipeline::run;
pub use strategy::{ScoreError, Strategy, ValidationError};
pub use throttle::{Clock, RateLimiter, SystemClock};
