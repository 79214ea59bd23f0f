use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Body, Bytes, Frame};
use std::io;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

pub fn empty<E>() -> BoxBody<Bytes, E> {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn full<E>(bytes: impl Into<Bytes>) -> BoxBody<Bytes, E> {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn from_reader<R>(reader: R) -> impl Body<Data = Bytes, Error = io::Error>
where
    R: AsyncRead,
{
    let stream = ReaderStream::with_capacity(reader, 64 * 1024);
    StreamBody::new(stream.map_ok(Frame::data))
}
