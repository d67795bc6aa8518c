pub mod create_user;
pub mod tokens;
pub mod update_password;

use async_graphql::MergedObject;

pub use create_user::CreateUserMutation;
pub use tokens::TokenMutation;
pub use update_password::UpdatePasswordMutation;

/// Combined mutation root.
#[derive(MergedObject, Default)]
pub struct Mutation(CreateUserMutation, UpdatePasswordMutation, TokenMutation);
