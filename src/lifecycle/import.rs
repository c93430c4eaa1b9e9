use std::sync::Arc;

use dto_framework::{Data, Dto, DtoError, Resolver, Value};
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, instrument, warn};

use crate::model::Person;

/// Errors that can occur during a batch import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not a JSON array of objects.
    #[error("Invalid import payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record could not be populated.
    #[error("Record {index} rejected: {source}")]
    Record {
        index: usize,
        #[source]
        source: DtoError,
    },

    /// A population task panicked or was cancelled.
    #[error("Import task failed: {0}")]
    Join(#[from] JoinError),
}

/// Populates one [`Person`] per record on the blocking pool, all sharing
/// `resolver`. Results keep the input order. Every record is attempted; on
/// failure the rejection with the lowest index is returned.
#[instrument(skip_all, fields(records = records.len()))]
pub async fn import_people(
    records: Vec<Data>,
    resolver: Arc<dyn Resolver>,
) -> Result<Vec<Person>, ImportError> {
    let mut tasks = JoinSet::new();
    for (index, record) in records.into_iter().enumerate() {
        let resolver = Arc::clone(&resolver);
        tasks.spawn_blocking(move || (index, Person::with_data(record, Some(resolver))));
    }

    let mut people = Vec::with_capacity(tasks.len());
    let mut rejected: Option<(usize, DtoError)> = None;
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        match result {
            Ok(person) => {
                debug!(index, "Record imported");
                people.push((index, person));
            }
            Err(source) => {
                warn!(index, error = %source, "Record rejected");
                if rejected.as_ref().is_none_or(|(first, _)| index < *first) {
                    rejected = Some((index, source));
                }
            }
        }
    }

    if let Some((index, source)) = rejected {
        return Err(ImportError::Record { index, source });
    }

    people.sort_by_key(|(index, _)| *index);
    info!(count = people.len(), "Import completed");
    Ok(people.into_iter().map(|(_, person)| person).collect())
}

/// Like [`import_people`], from a JSON array of objects.
pub async fn import_people_json(
    json: &str,
    resolver: Arc<dyn Resolver>,
) -> Result<Vec<Person>, ImportError> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;
    let records: Vec<Data> = records
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect::<Data>()
        })
        .collect();
    import_people(records, resolver).await
}
