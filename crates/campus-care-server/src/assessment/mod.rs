// crates/campus-care-server/src/assessment/mod.rs
// Self-assessment questionnaires: catalogs, scoring, submissions

pub mod instruments;
mod scoring;
pub mod submission;

pub use instruments::{InstrumentSpec, instrument_spec};
pub use scoring::score;
pub use submission::{
    AssessmentService, InMemoryProgress, ProgressRecord, ProgressSink, SubmissionGuard,
    SubmissionPermit,
};

use campus_care_types::{Instrument, InstrumentInfo};

use crate::error::{CareError, Result};

/// Parse an instrument tag from a URL segment or CLI flag
pub fn parse_instrument(tag: &str) -> Result<Instrument> {
    Instrument::parse(tag).ok_or_else(|| CareError::UnknownInstrument(tag.to_string()))
}

/// Catalogs for every instrument, in a stable order
pub fn catalog() -> Vec<InstrumentInfo> {
    Instrument::ALL
        .iter()
        .map(|i| instrument_spec(*i).info())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instrument_unknown() {
        assert!(matches!(
            parse_instrument("beck"),
            Err(CareError::UnknownInstrument(tag)) if tag == "beck"
        ));
        assert_eq!(parse_instrument("PHQ-9").unwrap(), Instrument::Phq9);
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<Instrument> = catalog().iter().map(|c| c.instrument).collect();
        assert_eq!(names, Instrument::ALL.to_vec());
    }
}
