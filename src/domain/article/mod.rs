//! Article module - the publishable news item and its validity filter.

mod article;
mod link;

pub use article::{Article, PublishStamp};
pub use link::{is_valid_link, publishable};
