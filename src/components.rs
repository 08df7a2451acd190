//! HTML building blocks of the widget page.
//!
//! Each component is a plain value that renders an HTML fragment; the
//! server composes them into a page.

pub mod form;
pub mod html;
pub mod page;
pub mod stats_view;

pub use form::UserForm;
pub use page::Page;
pub use stats_view::StatsView;
