use crate::catalog::{Catalog, CatalogLoader};
use crate::config::{CatalogConfig, StaticConfig};
use crate::services::{
    DispatchService, InfluencerService, LinkService, MappingService, NoticeRenderer, StatsService,
    SubmissionService, TemplateService,
};
use crate::storage::{Repository, StorageFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 服务器运行所需的共享组件，全部以 `Arc` 在 worker 间共享
#[derive(Clone)]
pub struct StartupContext {
    pub catalog: Arc<Catalog>,
    pub repository: Arc<dyn Repository>,
    pub link_service: Arc<LinkService>,
    pub submission_service: Arc<SubmissionService>,
    pub mapping_service: Arc<MappingService>,
    pub dispatch_service: Arc<DispatchService>,
    pub stats_service: Arc<StatsService>,
    pub influencer_service: Arc<InfluencerService>,
    pub template_service: Arc<TemplateService>,
    pub notice_renderer: Arc<NoticeRenderer>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub admin_prefix: String,
    pub health_prefix: String,
    pub admin_token: String,
}

impl StartupContext {
    /// 由已加载的目录和存储组装所有 service
    pub fn assemble(
        config: &StaticConfig,
        catalog: Catalog,
        repository: Arc<dyn Repository>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let link_service = Arc::new(LinkService::new(catalog.clone()));
        let submission_service = Arc::new(SubmissionService::new(
            repository.clone(),
            link_service.clone(),
        ));
        let mapping_service = Arc::new(MappingService::new(repository.clone()));
        let dispatch_service = Arc::new(DispatchService::new(
            repository.clone(),
            config.dispatch.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(repository.clone()));
        let influencer_service = Arc::new(InfluencerService::new(repository.clone()));
        let template_service = Arc::new(TemplateService::new(repository.clone()));
        let notice_renderer = Arc::new(NoticeRenderer::new(&config.notice));

        let route_config = RouteConfig {
            admin_prefix: config.api.admin_prefix.clone(),
            health_prefix: config.api.health_prefix.clone(),
            admin_token: config.api.admin_token.clone(),
        };

        Self {
            catalog,
            repository,
            link_service,
            submission_service,
            mapping_service,
            dispatch_service,
            stats_service,
            influencer_service,
            template_service,
            notice_renderer,
            route_config,
        }
    }
}

/// 加载目录并校验兜底条目，服务器和 CLI 共用
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog> {
    let catalog = if config.source_path.is_empty() {
        info!("No catalog source configured, using built-in defaults");
        Catalog::default_catalog()
    } else {
        CatalogLoader::from_config(config).load(&config.source_path)
    };

    // 兜底条目缺失时拒绝启动
    catalog
        .verify_integrity()
        .context("Catalog integrity check failed")?;
    Ok(catalog)
}

/// 准备服务器启动的上下文
/// 包括目录、存储和路由配置等
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let catalog = load_catalog(&config.catalog)?;
    info!(
        "Catalog loaded: {} entries across {} countries (source: {})",
        catalog.len(),
        catalog.country_codes().len(),
        catalog.source()
    );

    let repository = StorageFactory::create(&config.storage)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", repository.backend_name());

    let context = StartupContext::assemble(config, catalog, repository);
    check_component_enabled(&context.route_config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(context)
}

fn check_component_enabled(route_config: &RouteConfig) {
    if route_config.admin_token.is_empty() {
        info!("Admin API is disabled (admin_token not set)");
    } else {
        if route_config.admin_token.len() < 8 {
            warn!("WARNING: Admin Token is very short. Consider using a stronger token.");
        }
        info!("Admin API available at: {}", route_config.admin_prefix);
    }

    info!("Health API available at: {}", route_config.health_prefix);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[tokio::test]
    async fn test_prepare_with_defaults() {
        let config = StaticConfig::default();
        let context = prepare_server_startup(&config).await.unwrap();
        assert!(!context.catalog.is_empty());
        assert_eq!(context.repository.backend_name(), "memory");
        assert_eq!(context.route_config.admin_prefix, "/admin");
    }

    #[tokio::test]
    async fn test_unknown_backend_fails_startup() {
        let config = StaticConfig {
            storage: StorageConfig {
                backend: "mongodb".to_string(),
                ..StorageConfig::default()
            },
            ..StaticConfig::default()
        };
        assert!(prepare_server_startup(&config).await.is_err());
    }
}
