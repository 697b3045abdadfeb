#![allow(async_fn_in_trait)]

extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate futures;
extern crate jsonwebtoken;
extern crate serde;
extern crate serde_json;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
pub mod request;
pub mod response;

use actix_web::middleware::Logger;
use actix_web::web::{delete, get, patch, post, put, scope, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::core::services::fanout::FanOut;
use crate::database::sqlx::PgSqlxManager;
use crate::impls::mailer::logging::LogMailer;
use crate::impls::notifier::{email::EmailNotifier, inbox::InboxNotifier};
use crate::middlewares::jwt::JWTMiddleware;

type Db = PgSqlxManager;
type Email = EmailNotifier<LogMailer>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await.context("failed to run migrations")?;
        log::info!("database migrations applied");
    }

    let manager = PgSqlxManager::new(pool);
    let fan_out = Data::new(FanOut::new(
        InboxNotifier,
        EmailNotifier::new(LogMailer::new(&config.mail_sender)),
        config.notify_inactive_admins,
    ));
    let secret = config.jwt_secret.clone().into_bytes();

    log::info!("listening on {}:{}", config.bind_address, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            .app_data(Data::new(manager.clone()))
            .app_data(fan_out.clone())
            .route("/", get().to(handlers::home))
            .service(
                scope("/membership")
                    .wrap(JWTMiddleware::new(secret.clone()))
                    .route("/add", post().to(handlers::membership::add::<Db, InboxNotifier, Email>))
                    .route("/delete", delete().to(handlers::membership::delete::<Db>))
                    .route("/update/status", put().to(handlers::membership::update_status::<Db>))
                    .route("/list", get().to(handlers::membership::list::<Db>)),
            )
            .service(
                scope("/notification_admin")
                    .wrap(JWTMiddleware::new(secret.clone()))
                    .route("/add", post().to(handlers::notification::add::<Db>))
                    .route("/unread", get().to(handlers::notification::unread::<Db>))
                    .route("/unread/count", get().to(handlers::notification::unread_count::<Db>))
                    .route("/all", get().to(handlers::notification::all::<Db>))
                    .route("/read", get().to(handlers::notification::read::<Db>))
                    .route("/mark-as-read", patch().to(handlers::notification::mark_as_read::<Db>)),
            )
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
