//! Dashboard module - totals over positions and their text rendering.

mod dashboard_model;
mod dashboard_view;



pub use dashboard_model::{total_buying_price, Dashboard, Holding};
pub use dashboard_view::DashboardView;
