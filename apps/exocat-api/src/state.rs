use std::sync::Arc;

use exocat_service::CatalogService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	pub fn new(config: exocat_config::Config) -> color_eyre::Result<Self> {
		let service = CatalogService::new(config)?;

		Ok(Self::with_service(service))
	}

	pub fn with_service(service: CatalogService) -> Self {
		Self { service: Arc::new(service) }
	}
}
