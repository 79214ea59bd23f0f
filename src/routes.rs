use crate::body::empty;
use crate::err::Error;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW};
use hyper::{Method, Request, Response, StatusCode};
use std::path::PathBuf;

mod files;
mod index;
mod path;

/// A URL prefix bound to a directory on disk.
pub struct Mount {
    prefix: &'static str,
    dir: PathBuf,
}

impl Mount {
    pub fn new(prefix: &'static str, dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix,
            dir: dir.into(),
        }
    }
}

/// The route table, built once at startup and shared read-only for the
/// process lifetime. Asset mounts are consulted first (longest matching
/// prefix wins); every other path renders the index template.
pub struct Router {
    mounts: Vec<Mount>,
    template: PathBuf,
}

impl Router {
    pub fn new(mounts: Vec<Mount>, template: impl Into<PathBuf>) -> Self {
        Self {
            mounts,
            template: template.into(),
        }
    }
}

pub async fn respond_to_request<B>(
    req: Request<B>,
    router: &Router,
) -> Response<BoxBody<Bytes, Error>> {
    let path = req.uri().path();
    let mount = router
        .mounts
        .iter()
        .filter(|mount| path.starts_with(mount.prefix))
        .max_by_key(|mount| mount.prefix.len());

    match mount {
        Some(mount) => match *req.method() {
            Method::GET | Method::HEAD => {
                let tail = &path[mount.prefix.len()..];
                files::respond(&req, mount, tail).await
            }
            _ => {
                log::warn!("{} {} -> [method not allowed]", req.method(), req.uri());
                let mut resp = Response::new(empty());
                *resp.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
                resp.headers_mut()
                    .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
                resp
            }
        },
        None => index::respond(&req, &router.template).await,
    }
}
