pub mod app;
pub mod archive;
pub mod judicial;
pub mod report;
pub mod ui;
pub mod util;
