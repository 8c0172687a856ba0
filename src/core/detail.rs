use crate::core::rate::{rate, Rate};
use crate::domain::model::{AdmissionRecord, InstitutionDetail};
use crate::domain::ports::SchoolSource;

/// One academic year with its derived acceptance rates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView<'a> {
    pub record: &'a AdmissionRecord,
    pub overall_rate: Rate,
    pub international_rate: Rate,
}

impl<'a> RecordView<'a> {
    pub fn new(record: &'a AdmissionRecord) -> Self {
        Self {
            record,
            overall_rate: rate(record.total_admitted, record.total_applicants),
            international_rate: rate(record.admitted_international, record.applicants_international),
        }
    }
}

/// Splits an institution's records into the current year and history.
///
/// The first record is taken as current without looking at its year label;
/// the API delivers records most-recent-first.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    detail: InstitutionDetail,
}

impl DetailViewModel {
    pub fn new(detail: InstitutionDetail) -> Self {
        Self { detail }
    }

    pub fn institution(&self) -> &InstitutionDetail {
        &self.detail
    }

    pub fn current(&self) -> Option<RecordView<'_>> {
        self.detail.admission_data.first().map(RecordView::new)
    }

    pub fn historical(&self) -> Vec<RecordView<'_>> {
        self.detail
            .admission_data
            .iter()
            .skip(1)
            .map(RecordView::new)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Found(DetailViewModel),
    NotFound,
}

/// Fetches one institution. Any failure is logged and becomes `NotFound`.
pub async fn load_detail<S: SchoolSource + ?Sized>(source: &S, id: &str) -> DetailState {
    tracing::debug!("Fetching details for ID: {}", id);
    match source.get_school(id).await {
        Ok(detail) => {
            tracing::debug!(
                "Loaded {} with {} admission records",
                detail.name,
                detail.admission_data.len()
            );
            DetailState::Found(DetailViewModel::new(detail))
        }
        Err(e) => {
            tracing::warn!("Could not load school {}: {}", id, e);
            DetailState::NotFound
        }
    }
}
