//! Windowless single lookup (`--fetch <ID>`).
//!
//! Goes through the same [`Session`] path as the UI so clamping and error
//! classification are identical.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{FetchState, Record, RecordFetcher, Session};

/// Extra time on top of the request timeout before giving up on the worker
const WAIT_SLACK: Duration = Duration::from_secs(1);

/// Fetch one record (id clamped) and wait for the result.
pub fn fetch_one(fetcher: Arc<dyn RecordFetcher>, id: i64, timeout: Duration) -> Result<Record> {
    let mut session = Session::new(fetcher, 1);
    let id = session.load_id(id);
    log::info!("Headless fetch of #{}", id);

    if !session.wait(timeout + WAIT_SLACK) {
        return Err(anyhow!("No result for #{} within {:?}", id, timeout + WAIT_SLACK));
    }

    match session.state() {
        FetchState::Success(record) => Ok(record.clone()),
        FetchState::Failure(err) => Err(err.clone().into()),
        other => Err(anyhow!("Unexpected fetch state: {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FetchError;

    struct Fixed;

    impl RecordFetcher for Fixed {
        fn fetch(&self, id: u32) -> Result<Record, FetchError> {
            if id == 1025 {
                return Err(FetchError::Decode {
                    id,
                    message: "missing field `name`".into(),
                });
            }
            Ok(Record {
                id,
                name: "bulbasaur".into(),
                height: 7,
                weight: 69,
                sprite: Some("http://x/1.png".into()),
                types: vec![],
            })
        }
    }

    #[test]
    fn test_fetch_one_clamps_and_returns_record() {
        let rec = fetch_one(Arc::new(Fixed), 0, Duration::from_secs(1)).unwrap();
        assert_eq!(rec.id, 1);
        assert_eq!(rec.sprite.as_deref(), Some("http://x/1.png"));
    }

    #[test]
    fn test_fetch_one_surfaces_classified_error() {
        let err = fetch_one(Arc::new(Fixed), 5000, Duration::from_secs(1)).unwrap_err();
        let fetch_err = err.downcast_ref::<FetchError>().unwrap();
        assert!(matches!(fetch_err, FetchError::Decode { id: 1025, .. }));
    }
}
