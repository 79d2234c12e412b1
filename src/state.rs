use std::sync::Arc;

use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

use crate::{config::Config, errors::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub sdb: Surreal<Any>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn init(config: Config) -> Result<Self> {
        let sdb = any::connect(config.db_endpoint.as_str()).await?;
        if let (Some(username), Some(password)) = (&config.db_username, &config.db_password) {
            sdb.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await?;
        }
        sdb.use_ns(&config.db_namespace)
            .use_db(&config.db_database)
            .await?;

        Ok(Self {
            sdb,
            config: Arc::new(config),
        })
    }
}
