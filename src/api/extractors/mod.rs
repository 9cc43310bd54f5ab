//! Request extractors that validate after deserializing.

mod validated_json;
mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
