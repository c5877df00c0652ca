//! Application state and factory
//!
//! [`AppState`] holds the services shared by every worker; [`create_app`]
//! wires routes, middleware and JSON handling around it.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use vt_core::repositories::{AccountRepository, ChannelRepository, SessionRegistry};
use vt_core::services::{
    AccountService, AuthService, BcryptPasswordHasher, MediaStore, TokenIssuer,
};
use vt_shared::config::{CookieConfig, CorsConfig};

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{health, users};

/// Account persistence and the refresh token slot, served by one store
pub trait AccountStore: AccountRepository + SessionRegistry + 'static {}

impl<T> AccountStore for T where T: AccountRepository + SessionRegistry + 'static {}

/// Services and settings shared across workers
pub struct AppState<A, C, M>
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    pub auth_service: Arc<AuthService<A, A, BcryptPasswordHasher, M>>,
    pub account_service: Arc<AccountService<A, C, M>>,
    pub tokens: Arc<TokenIssuer>,
    pub cookies: CookieConfig,
}

impl<A, C, M> AppState<A, C, M>
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    pub fn new(
        accounts: Arc<A>,
        channels: Arc<C>,
        media: Arc<M>,
        hasher: Arc<BcryptPasswordHasher>,
        tokens: Arc<TokenIssuer>,
        cookies: CookieConfig,
    ) -> Self {
        let auth_service = AuthService::new(
            Arc::clone(&accounts),
            Arc::clone(&accounts),
            hasher,
            Arc::clone(&media),
            Arc::clone(&tokens),
        );
        let account_service = AccountService::new(accounts, channels, media);

        Self {
            auth_service: Arc::new(auth_service),
            account_service: Arc::new(account_service),
            tokens,
            cookies,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<A, C, M>(
    app_state: web::Data<AppState<A, C, M>>,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let auth = JwtAuth::new(Arc::clone(&app_state.tokens));
    let json = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json)
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1/users")
                .route("/register", web::post().to(users::register::<A, C, M>))
                .route("/login", web::post().to(users::login::<A, C, M>))
                .route("/refresh-token", web::post().to(users::refresh_token::<A, C, M>))
                .route(
                    "/logout",
                    web::post().to(users::logout::<A, C, M>).wrap(auth.clone()),
                )
                .route(
                    "/change-password",
                    web::post()
                        .to(users::change_password::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/current-user",
                    web::get()
                        .to(users::current_user::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/update-account",
                    web::patch()
                        .to(users::update_account::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/avatar",
                    web::patch()
                        .to(users::update_avatar::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/cover-image",
                    web::patch()
                        .to(users::update_cover_image::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/c/{username}",
                    web::get()
                        .to(users::channel_profile::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/c/{username}/subscription",
                    web::post()
                        .to(users::set_subscription::<A, C, M>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/history",
                    web::get().to(users::watch_history::<A, C, M>).wrap(auth),
                ),
        )
        .default_service(web::route().to(not_found))
}
