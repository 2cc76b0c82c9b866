//! Route-mapped screens, each a state machine driven by the host.

pub mod detail;
pub mod form;
pub mod home;
pub mod list;

pub use detail::{DetailState, DetailView};
pub use form::{FormMode, FormView};
pub use home::HomeView;
pub use list::{ListView, Pagination};
