pub(crate) mod error;
pub(crate) mod gifs;
pub(crate) mod pages;
pub(crate) mod search;

pub(crate) use error::ApiError;
