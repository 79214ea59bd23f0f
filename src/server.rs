use crate::err::{AppliesTo, IoErrorExt};
use crate::routes::{self, Router};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Bind and serve forever. Returns only on a listener-level failure, which
/// the caller treats as fatal.
pub async fn run(addr: SocketAddr, router: Router) -> Result<(), io::Error> {
    let router = Arc::new(router);
    let listener = TcpListener::bind(addr).await?;

    println!("Started server at http://localhost:{}", addr.port());

    loop {
        let stream = accept(&listener).await?;
        let io = TokioIo::new(stream);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let serve = service_fn(move |req| {
                let router = Arc::clone(&router);
                async move { Ok::<_, Infallible>(routes::respond_to_request(req, &router).await) }
            });

            if let Err(e) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(io, serve)
                .await
            {
                log::error!("Error serving connection: {}", e);
            }
        });
    }
}

async fn accept(listener: &TcpListener) -> Result<TcpStream, io::Error> {
    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                stream.set_nodelay(true)?;
                return Ok(stream);
            }
            Err(e) => match e.applies_to() {
                AppliesTo::Connection => log::debug!("Aborted connection dropped: {}", e),
                AppliesTo::Listener => return Err(e),
            },
        }
    }
}
