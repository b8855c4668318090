pub mod reviews;

pub use reviews::ReviewMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ErrorExtensions, ID, Object, Result};

    pub(crate) use crate::db::ReviewKind;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::ReviewServices;
}
