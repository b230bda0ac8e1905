pub mod events;
pub mod handlers;
pub mod state;

pub use events::{ClickTarget, Key, UiEvent};
pub use handlers::Controller;
pub use state::{AppState, AppStateInner, Selection};
