use std::sync::Arc;

use actix_web::{middleware::Condition, web::Data, App, HttpServer};
use log::{error, info};
use sqlx::postgres::PgPoolOptions;

use bop_server::{
    apidocs,
    db::{PgStore, Store},
    options,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    options::initialize_all();
    options::print_all();

    let db_url = options::db_conn_string();

    // database
    let pool = PgPoolOptions::new()
        .max_connections(*options::DB_POOL_MAX_CONNS)
        .connect(&db_url);

    let pool = match pool.await {
        Ok(pool) => {
            info!("Connected to database successfully!");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if *options::DB_RUN_MIGRATIONS {
        if let Err(e) = sqlx::migrate!().run(&pool).await {
            error!("Failed to run database migrations: {}", e);
            std::process::exit(1);
        }
        info!("Database migrations are up to date");
    }

    let store: Arc<dyn Store> = Arc::new(PgStore::with_pool(pool));
    let store: Data<dyn Store> = Data::from(store);

    HttpServer::new(move || {
        // add logging middleware
        App::new()
            .wrap(Condition::new(*options::HANDLE_CORS, options::cors()))
            .wrap(actix_web::middleware::Logger::new("%{r}a %r -> %s in %Dms").log_target("http"))
            .app_data(Data::clone(&store))
            .configure(bop_server::configure_app)
            .service(apidocs::rapidoc())
    })
    .workers(*options::NUM_WEB_WORKERS)
    .bind(*options::BIND_ADDR)?
    .run()
    .await
}
