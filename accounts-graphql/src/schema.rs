use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use accounts_core::{TokenService, UserStore};

use crate::{mutations::Mutation, queries::Query};

pub type AccountsSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the combined schema with the ports the resolvers pull from
/// context.
pub fn build_schema(
    user_store: Arc<dyn UserStore>,
    token_service: Arc<dyn TokenService>,
) -> AccountsSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(user_store)
        .data(token_service)
        .finish()
}
