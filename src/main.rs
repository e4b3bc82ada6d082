use actix_cors::Cors;
use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::Arc;

use crate::{
    configs::{connect_database, AppConfig},
    middlewares::authentication,
    modules::{
        event::{repository_pg::EventRepositoryPg, service::EventService},
        friend::{repository_pg::FriendshipRepositoryPg, service::FriendService},
        group::{repository_pg::GroupRepositoryPg, service::GroupService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        notification::{repository_pg::NotificationRepositoryPg, service::NotificationService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod policy;
#[cfg(test)]
mod test;
mod utils;

#[actix_web::get("/")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> actix_web::HttpResponse {
    match sqlx::query("SELECT 1").execute(db_pool.get_ref()).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Server is running"),
        Err(e) => {
            log::error!("Health check failed: {:?}", e);
            actix_web::HttpResponse::ServiceUnavailable().body("Database unavailable")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("Configuration loaded");

    let db_pool = connect_database(&config.database)
        .await
        .map_err(|e| std::io::Error::other(format!("Database connection error: {e}")))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendshipRepositoryPg::new(db_pool.clone()));
    let group_repo = Arc::new(GroupRepositoryPg::new(db_pool.clone()));
    let event_repo = Arc::new(EventRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryPg::new(db_pool.clone()));

    let notification_service = NotificationService::with_dependencies(notification_repo);
    let user_service = UserService::with_dependencies(user_repo.clone(), config.auth.clone());
    let friend_service = FriendService::with_dependencies(
        friend_repo.clone(),
        user_repo.clone(),
        notification_service.clone(),
    );
    let group_service = GroupService::with_dependencies(
        group_repo.clone(),
        user_repo.clone(),
        notification_service.clone(),
    );
    let event_service = EventService::with_dependencies(event_repo, group_repo);
    let message_service = MessageService::with_dependencies(message_repo, user_repo, friend_repo);

    let auth_config = config.auth.clone();
    let frontend_url = config.frontend_url.clone();

    log::info!("Starting server at http://{}:{}", config.ip, config.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(auth_config.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(group_service.clone()))
            .app_data(web::Data::new(event_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::friend::route::configure)
                        .configure(modules::group::route::configure)
                        .configure(modules::event::route::configure)
                        .configure(modules::message::route::configure)
                        .configure(modules::notification::route::configure),
                ),
            )
    })
    .bind((config.ip.as_str(), config.port))?
    .workers(2)
    .run()
    .await
}
