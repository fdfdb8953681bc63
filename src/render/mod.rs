//! Rendering for the self-contained HTML alluvial report.

pub mod html;

pub use html::render_html_report;
