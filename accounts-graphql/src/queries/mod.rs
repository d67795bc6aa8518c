pub mod fetch_users;

use async_graphql::MergedObject;

pub use fetch_users::FetchUsersQuery;

/// Combined query root.
#[derive(MergedObject, Default)]
pub struct Query(FetchUsersQuery);
