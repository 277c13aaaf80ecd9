mod fields;
mod footer;
mod header;
mod layout;
mod message;
mod panel;

pub use fields::{FormView, render_fields};
pub use footer::render_footer;
pub use header::render_header;
pub use message::render_message;
pub use panel::{panel_width, render_schema_panel};
