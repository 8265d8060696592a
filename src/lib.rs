//! PDF Slicer: a small desktop tool for reordering, rotating, removing and
//! saving pages of PDF documents.

pub mod app;
pub mod pdf;
pub mod ui;
