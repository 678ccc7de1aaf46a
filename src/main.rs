use actix_web::web;
use dotenvy::dotenv;
use drink_order_service::config::Config;
use drink_order_service::{build_server, build_service};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let service = build_service(&config).map_err(std::io::Error::other)?;

    log::info!(
        "Starting server at http://{}:{} (drink catalog at {})",
        config.host,
        config.port,
        config.drink_api_url
    );

    build_server(web::Data::new(service), &config)?.await
}
