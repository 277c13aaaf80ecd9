mod components;
mod view;
mod widgets;

pub use view::{UiContext, ViewKind, draw};
pub use widgets::{FieldWidget, ItemWidget, render, render_screen};
