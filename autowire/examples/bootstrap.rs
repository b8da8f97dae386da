//! Wiring a small application with autowire.
//!
//! Run with `RUST_LOG=autowire_container=trace` to watch resolution.

use std::sync::Arc;

use autowire::prelude::*;
use autowire::{Autowire, component};
use tracing::info;
use tracing_subscriber::EnvFilter;

// === Define your traits and types ===

trait Logger {
    fn log(&self, msg: &str);
}

component!(dyn Logger, Config);

#[derive(Autowire)]
#[autowire(implements = "dyn Logger")]
struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct Config {
    database_url: String,
}

#[derive(Autowire)]
struct Database {
    config: Arc<Config>,
    logger: Arc<dyn Logger>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.config.database_url)
    }
}

#[derive(Autowire)]
struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

#[derive(Autowire)]
struct UserService {
    repo: Arc<UserRepository>,
    logger: Arc<dyn Logger>,
}

impl UserService {
    fn get_user(&self, id: u64) -> String {
        self.logger.log(&format!("Getting user {id}"));
        self.repo.find_user(id)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autowire_container=debug")),
        )
        .init();

    let mut container = Container::builder()
        .label("app")
        .add(Arc::new(Config {
            database_url: "postgres://localhost/myapp".to_string(),
        }))
        .bind::<dyn Logger, ConsoleLogger>()
        .build();

    info!(?container, "Container ready");

    // Database, UserRepository and UserService are never registered
    let service = container.construct::<UserService>()?;
    println!("{}", service.get_user(42));

    let again = container.construct::<UserService>()?;
    println!("same service: {}", Arc::ptr_eq(&service, &again));

    let summary = container.call(|repo: Arc<UserRepository>, logger: Arc<dyn Logger>| {
        logger.log("called with injected arguments");
        repo.find_user(7)
    })?;
    println!("{summary}");

    {
        let mut request = container.scoped();
        request.forget::<UserService>();
        let scoped = request.construct::<UserService>()?;
        println!("scoped service is new: {}", !Arc::ptr_eq(&service, &scoped));
        println!("repository is shared: {}", Arc::ptr_eq(&service.repo, &scoped.repo));
    }

    Ok(())
}
