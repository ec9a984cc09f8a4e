pub mod cycle_import;
pub mod kpi;
