//! HTTP 层共享状态，通过 `web::Data` 注入

use std::sync::Arc;

use crate::api::session::SessionSigner;
use crate::config::{AdminConfig, SiteConfig, StaticConfig};
use crate::services::{BlogService, CatalogService, ClickService};
use crate::storage::Storage;

pub struct AppState {
    pub catalog: CatalogService,
    pub blog: BlogService,
    pub clicks: ClickService,
    pub session: Arc<SessionSigner>,
    pub admin: AdminConfig,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: &StaticConfig) -> Self {
        Self::with_signer(
            storage,
            config,
            Arc::new(SessionSigner::from_config(&config.admin)),
        )
    }

    pub fn with_signer(
        storage: Arc<dyn Storage>,
        config: &StaticConfig,
        session: Arc<SessionSigner>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(storage.clone())
                .with_other_stores_limit(config.site.other_stores_limit),
            blog: BlogService::new(storage.clone()),
            clicks: ClickService::new(storage),
            session,
            admin: config.admin.clone(),
            site: config.site.clone(),
        }
    }
}
