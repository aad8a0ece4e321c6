pub mod blog_post;
pub mod story;
pub mod user;
