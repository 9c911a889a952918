//! Auth Repositories

mod sessions;
mod users;

pub(crate) use sessions::SqliteSessionsRepository;
pub(crate) use users::SqliteUsersRepository;
