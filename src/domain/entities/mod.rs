pub mod safety_report;
pub mod token;
pub mod usage_record;
