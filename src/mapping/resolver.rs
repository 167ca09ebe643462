use crate::error::StoreError;
use crate::models::Author;
use crate::store::Repository;

/// Display name used for author ids that are not in the store.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Resolve author ids to display names, in order.
///
/// The result always has the same length as `ids`. Each id is looked up independently; ids that
/// are not stored resolve to [`UNKNOWN_AUTHOR`]. The store is only read.
pub fn resolve_author_names<A>(ids: &[String], authors: &A) -> Result<Vec<String>, StoreError>
where
    A: Repository<Author> + ?Sized,
{
    ids.iter()
        .map(|id| {
            Ok(authors
                .find_by_id(id)?
                .map(|author| author.name)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
        })
        .collect()
}
