mod config_ui;
pub(crate) mod input;
mod options;
mod registry;
mod runtime;
mod status;
mod terminal;
mod validation;

pub use config_ui::ConfigUi;
pub use options::UiOptions;
pub use registry::{Navigation, RegistryError, Screen, ScreenRegistry};
pub use validation::{SaveOutcome, save_current};
