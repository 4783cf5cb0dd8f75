use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;

use chat_room::{
    app::{cors, session_middleware},
    config::Config,
    db,
    middlewares::auth::Authentication,
    routes,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let pool = db::build_pool(&config.database_url).map_err(std::io::Error::other)?;
    {
        let mut conn = pool.get().map_err(std::io::Error::other)?;
        db::run_migrations(&mut conn).map_err(std::io::Error::other)?;
    }

    let session_key = config.session_key();
    let server_addr = config.host.clone();
    let server_port = config.port;
    let workers = config.workers;

    let app = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Authentication)
            .wrap(session_middleware(
                session_key.clone(),
                config.session_ttl_hours,
            ))
            .wrap(cors(&config))
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .wrap(middleware::NormalizePath::trim())
    })
    .workers(workers)
    .bind((server_addr.as_str(), server_port))?
    .run();

    log::info!("Server running at http://{server_addr}:{server_port}");

    app.await
}
