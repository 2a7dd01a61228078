pub mod alerts;
pub mod dashboard;
pub mod filters;
pub mod help;
pub mod table;
