use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, domain_events::TracingDomainEventSink};
use focusgoals_connect::AuthClient;
use focusgoals_core::{
    auth::AuthProviderTrait,
    events::DomainEventSink,
    focus::FocusService,
    gamification::{GamificationService, GamificationServiceTrait},
    goals::{GoalService, GoalServiceTrait},
};
use focusgoals_storage_sqlite::{
    db::{self, write_actor},
    goals::GoalRepository,
    sessions::FocusSessionRepository,
};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub gamification_service: Arc<dyn GamificationServiceTrait + Send + Sync>,
    /// Holds the single active-goal slot; transitions run one at a time.
    pub focus_service: Mutex<FocusService>,
    /// `None` when no auth backend is configured.
    pub auth_provider: Option<Arc<dyn AuthProviderTrait>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let domain_event_sink: Arc<dyn DomainEventSink> = Arc::new(TracingDomainEventSink::new());

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service = Arc::new(GoalService::new(
        goal_repository,
        domain_event_sink.clone(),
    ));

    let session_repository = Arc::new(FocusSessionRepository::new(pool.clone(), writer.clone()));
    let gamification_service: Arc<dyn GamificationServiceTrait + Send + Sync> = Arc::new(
        GamificationService::new(session_repository, domain_event_sink.clone()),
    );
    let focus_service = FocusService::new(gamification_service.clone(), domain_event_sink);

    let auth_provider: Option<Arc<dyn AuthProviderTrait>> =
        match (&config.auth_url, &config.auth_api_key) {
            (Some(url), Some(api_key)) => {
                tracing::info!("Auth backend configured at {}", url);
                Some(Arc::new(AuthClient::new(url, api_key)?))
            }
            _ => {
                tracing::warn!("FG_AUTH_URL/FG_AUTH_API_KEY not set; auth routes are disabled");
                None
            }
        };

    Ok(Arc::new(AppState {
        goal_service,
        gamification_service,
        focus_service: Mutex::new(focus_service),
        auth_provider,
    }))
}
