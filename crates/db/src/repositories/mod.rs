pub mod blog_post_repo;
pub mod story_repo;
pub mod user_repo;

pub use blog_post_repo::BlogPostRepo;
pub use story_repo::StoryRepo;
pub use user_repo::UserRepo;
