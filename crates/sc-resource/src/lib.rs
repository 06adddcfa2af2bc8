mod cache;
mod transport;

pub use cache::ResourceCache;
pub use transport::{StdTransport, StdTransportOptions, Transport};
