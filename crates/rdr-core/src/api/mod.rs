pub mod client;
pub mod dashboards;
pub mod models;
pub mod queries;
pub mod visualizations;
