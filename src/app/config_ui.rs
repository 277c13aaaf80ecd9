use anyhow::Result;
use tracing::warn;

use crate::store::ConfigStore;

use super::{options::UiOptions, registry::ScreenRegistry, runtime::App};

/// Entry point of the interactive editor over a [`ConfigStore`].
pub struct ConfigUi {
    store: Box<dyn ConfigStore>,
    options: UiOptions,
}

impl ConfigUi {
    pub fn new(store: impl ConfigStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Run until the user quits and return the names of the schemas that were saved.
    pub fn run(self) -> Result<Vec<String>> {
        let ConfigUi { store, options } = self;
        let registry = ScreenRegistry::from_store(store.as_ref());
        for (schema, err) in registry.check_all() {
            warn!(event = "app.registry.schema_broken", schema = %schema, error = %err);
        }
        let mut app = App::new(registry, store, options);
        app.run()
    }
}
