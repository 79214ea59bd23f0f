mod body;
mod err;
mod mime;
mod opt;
mod port;
mod routes;
mod server;
mod template;

use crate::routes::{Mount, Router};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let opt::Options { verbose, args } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let port = port::resolve(&args);
    let router = Router::new(
        vec![
            Mount::new("/static/", "./static"),
            Mount::new("/src/", "./src"),
            Mount::new("/media/", "./media"),
        ],
        "templates/index.html",
    );

    server::run(SocketAddr::from(([0, 0, 0, 0], port)), router).await?;

    Ok(())
}
