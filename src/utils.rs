use std::error::Error;

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

// Public identifiers are hex ObjectIds minted by the application, never the store's _id
pub fn new_public_id() -> String {
    ObjectId::new().to_hex()
}

// Second precision, so a stored timestamp compares equal after a round trip
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
