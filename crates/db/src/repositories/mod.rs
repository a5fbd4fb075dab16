pub mod role_repo;
pub mod user_repo;

pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
