//! Client side of the dashboard: the report state controller and the HTTP
//! API it drives.
//!
//! [`ReportController`] owns one [`ViewState`] per dashboard session and is
//! the only thing that mutates it. Rendering is a pure projection of the
//! returned state.

pub mod api;
pub mod controller;
pub mod error;
pub(crate) mod retry;
pub mod view_state;

pub use api::{DashboardApi, HttpDashboardApi};
pub use controller::ReportController;
pub use error::{ApiError, ControllerError};
pub use view_state::{PastReportRow, ViewMode, ViewState};
