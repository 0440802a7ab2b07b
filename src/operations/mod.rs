pub mod add;
pub mod browse;
pub mod remove;
pub mod report;
pub mod search_by_category;
