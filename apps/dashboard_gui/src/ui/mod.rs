//! UI layer for the dashboard: app shell, panels, and theme.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::DashboardApp;
