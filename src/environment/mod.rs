pub mod model;
pub mod types;

pub use model::Model;
pub use types::Config;

use std::sync::Arc;

use model::PhotoService;

/// Shared collaborators handed to every reducer.
#[derive(Clone, Debug)]
pub struct Environment {
    pub model: Model,
    pub config: Config,
}

impl Environment {
    /// The token comes from the ambient auth collaborator; `None` issues
    /// unauthenticated requests, which the server rejects for everything but
    /// the public feed.
    pub fn new(config: Config, token: Option<String>) -> Self {
        let model = Model::new(&config, token);
        Self { model, config }
    }

    pub fn with_service(config: Config, service: Arc<dyn PhotoService + Send + Sync>) -> Self {
        Self {
            model: Model::with_service(service),
            config,
        }
    }
}
