use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::brush::fit_filter;
use crate::render::Renderer;

use super::{ChartEngine, ChartSnapshot};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both the bare snapshot and the versioned envelope.
    ///
    /// A snapshot whose `filtered_domain` does not lie inside its
    /// `original_x_domain` is rejected.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let snapshot = match serde_json::from_str::<ChartSnapshot>(input) {
            Ok(snapshot) => snapshot,
            Err(_) => Self::from_contract_v1_str(input)?,
        };
        snapshot.validate_filter()?;
        Ok(snapshot)
    }

    fn from_contract_v1_str(input: &str) -> ChartResult<Self> {
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }

    /// Checks that the recorded filter is one the brush could have
    /// committed against the recorded original domain.
    pub fn validate_filter(&self) -> ChartResult<()> {
        let Some(filter) = self.filtered_domain.as_ref() else {
            return Ok(());
        };
        let Some(original) = self.original_x_domain.as_ref() else {
            return Err(ChartError::InvalidData(
                "snapshot carries a filter without an original x domain".to_owned(),
            ));
        };
        if filter.kind() != original.kind() {
            return Err(ChartError::DomainMismatch(format!(
                "snapshot filter kind {:?} does not match x axis kind {:?}",
                filter.kind(),
                original.kind()
            )));
        }
        match fit_filter(filter, original) {
            Some(fitted) if fitted == *filter => Ok(()),
            _ => Err(ChartError::InvalidData(
                "snapshot filter lies outside the original x domain".to_owned(),
            )),
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
