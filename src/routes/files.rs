use crate::body::{empty, from_reader};
use crate::err::Error;
use crate::mime;
use crate::routes::{path, Mount};
use headers::{
    AcceptRanges, ContentLength, ContentRange, HeaderMapExt, IfModifiedSince, LastModified, Range,
};
use http_body_util::combinators::BoxBody;
use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use std::io::{self, SeekFrom};
use std::ops::Bound;
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Serve one file from a mount, `tail` being the request path with the
/// mount prefix already stripped.
pub async fn respond<B>(
    req: &Request<B>,
    mount: &Mount,
    tail: &str,
) -> Response<BoxBody<Bytes, Error>> {
    let Some(file_path) = path::resolve(&mount.dir, tail) else {
        log::warn!("{} {} -> [rejected path]", req.method(), req.uri());
        return not_found();
    };

    let (file_path, mut file) = match open(file_path).await {
        Ok(found) => found,
        Err(e) => {
            log::warn!("{} {} -> [file error] {}", req.method(), req.uri(), e);
            return not_found();
        }
    };

    let (len, modified) = match file.metadata().await {
        Ok(metadata) => (metadata.len(), metadata.modified().ok()),
        Err(e) => {
            log::warn!("{} {} -> [file error] {}", req.method(), req.uri(), e);
            return not_found();
        }
    };

    if let Some(modified) = modified {
        if let Some(since) = req.headers().typed_get::<IfModifiedSince>() {
            if !since.is_modified(modified) {
                log::info!("{} {} -> [not modified]", req.method(), req.uri());
                return not_modified(modified);
            }
        }
    }

    let head = *req.method() == Method::HEAD;
    let content_type = HeaderValue::from_static(mime::from_path(&file_path));

    match req.headers().typed_get::<Range>() {
        Some(range) => match range.satisfiable_ranges(len).next() {
            Some((start, end)) => {
                let start = match start {
                    Bound::Included(start) => start,
                    Bound::Excluded(start) => start + 1,
                    Bound::Unbounded => 0,
                };
                let end = match end {
                    Bound::Included(end) => end + 1,
                    Bound::Excluded(end) => end,
                    Bound::Unbounded => len,
                };
                if start >= end || end > len {
                    log::info!("{} {} -> [bad range]", req.method(), req.uri());
                    return range_not_satisfiable(len);
                }
                if let Err(e) = file.seek(SeekFrom::Start(start)).await {
                    log::warn!("{} {} -> [file error] {}", req.method(), req.uri(), e);
                    return not_found();
                }

                log::info!(
                    "{} {} -> {} [range {}..{} of {}]",
                    req.method(),
                    req.uri(),
                    file_path.display(),
                    start,
                    end,
                    len
                );
                let mut resp = Response::new(if head {
                    empty()
                } else {
                    body_of(file.take(end - start))
                });
                *resp.status_mut() = StatusCode::PARTIAL_CONTENT;
                resp.headers_mut().insert(CONTENT_TYPE, content_type);
                resp.headers_mut()
                    .typed_insert(ContentRange::bytes(start..end, len).unwrap());
                resp.headers_mut().typed_insert(ContentLength(end - start));
                if let Some(modified) = modified {
                    resp.headers_mut().typed_insert(LastModified::from(modified));
                }
                resp
            }
            None => {
                log::info!("{} {} -> [bad range]", req.method(), req.uri());
                range_not_satisfiable(len)
            }
        },
        None => {
            log::info!(
                "{} {} -> {}",
                req.method(),
                req.uri(),
                file_path.display()
            );
            let mut resp = Response::new(if head { empty() } else { body_of(file) });
            resp.headers_mut().insert(CONTENT_TYPE, content_type);
            resp.headers_mut().typed_insert(ContentLength(len));
            resp.headers_mut().typed_insert(AcceptRanges::bytes());
            if let Some(modified) = modified {
                resp.headers_mut().typed_insert(LastModified::from(modified));
            }
            resp
        }
    }
}

/// Open the resolved path, falling through to `index.html` for directories.
async fn open(mut path: PathBuf) -> Result<(PathBuf, File), io::Error> {
    if tokio::fs::metadata(&path).await?.is_dir() {
        path.push("index.html");
    }
    let file = File::open(&path).await?;
    Ok((path, file))
}

fn body_of(reader: impl tokio::io::AsyncRead + Send + Sync + 'static) -> BoxBody<Bytes, Error> {
    from_reader(reader).map_err(Error::from).boxed()
}

fn not_found() -> Response<BoxBody<Bytes, Error>> {
    let mut resp = Response::new(empty());
    *resp.status_mut() = StatusCode::NOT_FOUND;
    resp
}

fn not_modified(modified: SystemTime) -> Response<BoxBody<Bytes, Error>> {
    let mut resp = Response::new(empty());
    *resp.status_mut() = StatusCode::NOT_MODIFIED;
    resp.headers_mut().typed_insert(LastModified::from(modified));
    resp
}

fn range_not_satisfiable(len: u64) -> Response<BoxBody<Bytes, Error>> {
    let mut resp = Response::new(empty());
    *resp.status_mut() = StatusCode::RANGE_NOT_SATISFIABLE;
    resp.headers_mut()
        .typed_insert(ContentRange::unsatisfied_bytes(len));
    resp
}
