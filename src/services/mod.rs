pub mod providers;
pub mod scheduler;
pub mod sequence;

pub use providers::{HttpProvider, RecommendationProvider};
pub use scheduler::{Scheduler, TaskToken};
pub use sequence::{RequestSequence, RequestTicket};
