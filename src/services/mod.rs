pub mod resolver;
pub use resolver::{QueryResolver, ResolveError};

pub mod resolver_impl;
pub use resolver_impl::SeaOrmResolver;
