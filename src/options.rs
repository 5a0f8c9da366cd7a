use std::{net::SocketAddr, str::FromStr};

use actix_cors::Cors;
use lazy_static::lazy_static;
use log::{error, info, warn};

// get and parse an environment variable
// use default value if not set
fn var<T>(name: &str, default: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Debug,
{
    let given = std::env::var(name).unwrap_or(default.to_owned());
    match given.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(
                "Invalid config option `{}={}`: {:?} ({}'s default is usually {})",
                name, given, e, name, default
            );
            std::process::exit(1);
        }
    }
}

lazy_static! {
    pub static ref NUM_WEB_WORKERS: usize = var("NUM_WEB_WORKERS", "4");

    static ref DB_HOST: String = var("DB_HOST", "127.0.0.1");
    static ref DB_PORT: u16 = var("DB_PORT", "5432");
    static ref DB_USER: String = var("DB_USER", "bop-backend");
    static ref DB_PASSWORD: String = var("DB_PASSWORD", "dev");
    static ref DB_NAME: String = var("DB_NAME", "bop-backend");
    pub static ref DB_POOL_MAX_CONNS: u32 = var("DB_POOL_MAX_CONNS", "5");
    pub static ref DB_RUN_MIGRATIONS: bool = var("DB_RUN_MIGRATIONS", "true");

    pub static ref BIND_ADDR: SocketAddr = var("BIND_ADDR", "127.0.0.1:8080");

    // cookies are sent over plain http during development
    pub static ref COOKIE_SECURE: bool = var("COOKIE_SECURE", "false");

    pub static ref HANDLE_CORS: bool = var("HANDLE_CORS", "true");
    static ref CORS_ORIGIN: String = var("CORS_ORIGIN", "http://localhost:3000");

    pub static ref TOKEN_SIGNING_KEY: [u8; 32] = {
        let tsk: String = var("TOKEN_SIGNING_KEY", "");

        if tsk.is_empty() {
            info!("Generating new token signing key... (provide one with TOKEN_SIGNING_KEY)");
            crate::crypto::generate_token_sig_key()
        } else {
            let key = match hex::decode(tsk) {
                Ok(key) => key,
                Err(e) => {
                    error!("Invalid token signing key, must be hex encoded: {}", e);
                    std::process::exit(1);
                }
            };

            match key.try_into() {
                Ok(key) => key,
                Err(_) => {
                    error!("Invalid token signing key length, must be 32 bytes");
                    std::process::exit(1);
                }
            }
        }
    };
}

pub fn db_conn_string() -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}",
        *DB_USER, *DB_PASSWORD, *DB_HOST, *DB_PORT, *DB_NAME
    )
}

/// Cross-origin policy for the browser frontend.
/// Credentials are allowed so the token cookie travels with requests.
pub fn cors() -> Cors {
    Cors::default()
        .allowed_origin(&CORS_ORIGIN)
        .allowed_methods(["GET", "POST"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

pub fn initialize_all() {
    lazy_static::initialize(&NUM_WEB_WORKERS);

    if *NUM_WEB_WORKERS == 0 {
        error!("NUM_WEB_WORKERS must be at least 1");
        std::process::exit(1);
    }

    lazy_static::initialize(&BIND_ADDR);

    lazy_static::initialize(&DB_HOST);
    lazy_static::initialize(&DB_PORT);
    lazy_static::initialize(&DB_USER);
    lazy_static::initialize(&DB_PASSWORD);
    lazy_static::initialize(&DB_NAME);
    lazy_static::initialize(&DB_POOL_MAX_CONNS);
    lazy_static::initialize(&DB_RUN_MIGRATIONS);

    if *DB_POOL_MAX_CONNS == 0 {
        error!("DB_POOL_MAX_CONNS must be at least 1");
        std::process::exit(1);
    }

    lazy_static::initialize(&COOKIE_SECURE);
    lazy_static::initialize(&HANDLE_CORS);
    lazy_static::initialize(&CORS_ORIGIN);

    lazy_static::initialize(&TOKEN_SIGNING_KEY);
}

pub fn print_all() {
    info!("config: Listening on {} with {} workers", *BIND_ADDR, *NUM_WEB_WORKERS);
    info!(
        "config: Database: {} at {}:{} ({} max connections)",
        *DB_NAME, *DB_HOST, *DB_PORT, *DB_POOL_MAX_CONNS
    );
    info!(
        "config: Run migrations on startup: {}",
        if *DB_RUN_MIGRATIONS { "yes" } else { "no" }
    );

    if *HANDLE_CORS {
        info!("config: CORS allowed origin: {}", *CORS_ORIGIN);
    } else {
        info!("config: CORS handling disabled");
    }

    if !*COOKIE_SECURE {
        warn!("COOKIE_SECURE is false, the token cookie will also be sent over plain http! Enable it in production.");
    }
}
