use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::app_conf::AppConfig;
use crate::config::{AuthConfig, EmailConfig, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::connect_database;
use crate::repository::counter_repo::MongoCounterRepository;
use crate::repository::lead_repo::MongoLeadRepository;
use crate::repository::quotation_repo::MongoQuotationRepository;
use crate::repository::task_repo::MongoTaskRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::auth_router::auth_router;
use crate::router::lead_router::lead_router;
use crate::router::quotation_router::quotation_router;
use crate::router::task_router::task_router;
use crate::router::user_router::user_router;
use crate::service::lead_service::LeadServiceImpl;
use crate::service::quotation_service::QuotationServiceImpl;
use crate::service::task_service::TaskServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::email::SmtpEmailService;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    /// Wires configuration, repositories, services and routes.
    ///
    /// Secrets (JWT secret, admin code, Mongo URI) have no fallbacks; a
    /// missing one aborts startup here instead of running insecurely.
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let auth_config = AuthConfig::from_env().expect("Auth config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        let db = connect_database(&mongo_config)
            .await
            .expect("MongoDB connection error");

        let user_repo = Arc::new(
            MongoUserRepository::new(&db)
                .await
                .expect("User repo error"),
        );
        let lead_repo = MongoLeadRepository::new(&db);
        let task_repo = MongoTaskRepository::new(&db);
        let quotation_repo = MongoQuotationRepository::new(&db)
            .await
            .expect("Quotation repo error");
        let counter_repo = MongoCounterRepository::new(&db);

        // Mail is optional: without SMTP configuration the send-email
        // endpoint fails per-request, everything else is unaffected.
        let email_service = match EmailConfig::from_env() {
            Ok(email_config) => {
                Some(SmtpEmailService::new(email_config).expect("SMTP service error"))
            }
            Err(e) => {
                warn!("Email delivery disabled: {}", e);
                None
            }
        };

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(
            user_repo,
            jwt_utils.clone(),
            auth_config,
        ));
        let lead_service = Arc::new(LeadServiceImpl::new(lead_repo));
        let task_service = Arc::new(TaskServiceImpl::new(task_repo));
        let quotation_service = Arc::new(QuotationServiceImpl::new(
            quotation_repo,
            counter_repo,
            email_service,
        ));

        let auth_state = Arc::new(AuthState {
            jwt_utils,
            user_service: user_service.clone(),
        });

        let router = Router::new()
            .merge(auth_router(user_service.clone()))
            .merge(user_router(user_service, auth_state.clone()))
            .merge(lead_router(lead_service, auth_state.clone()))
            .merge(task_router(task_service, auth_state.clone()))
            .merge(quotation_router(quotation_service, auth_state))
            .route("/health", get(|| async { "OK" }))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        App { config, router }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
