//! Reusable UI components.

pub mod auth_error_banner;
pub mod route_guard;
pub mod task_list;
