use crate::body::{empty, full};
use crate::err::Error;
use crate::template::Template;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use hyper::{Request, Response, StatusCode};
use std::path::Path;

/// Render the index page. The template is re-read and re-parsed on every
/// request so edits show up without a restart.
pub async fn respond<B>(req: &Request<B>, template: &Path) -> Response<BoxBody<Bytes, Error>> {
    let page = match render(template).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("{} {} -> [template error] {}", req.method(), req.uri(), e);
            return redirect_home();
        }
    };

    log::info!(
        "{} {} -> [rendered {} bytes]",
        req.method(),
        req.uri(),
        page.len()
    );
    let mut resp = Response::new(full(page));
    resp.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    resp
}

async fn render(template: &Path) -> Result<String, Error> {
    let source = tokio::fs::read_to_string(template).await?;
    let template = Template::parse(&source)?;
    Ok(template.render(""))
}

/// Template failures answer with `Location: /` carried on a 500 rather than
/// a 3xx. Unconventional, but existing clients depend on it, so it stays.
fn redirect_home() -> Response<BoxBody<Bytes, Error>> {
    let mut resp = Response::new(empty());
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp.headers_mut()
        .insert(LOCATION, HeaderValue::from_static("/"));
    resp
}
