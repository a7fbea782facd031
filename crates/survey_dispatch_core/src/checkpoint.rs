use serde_json::{Map, Value};

use crate::contract::{DispatchError, Payload};

/// Pipeline stage whose input file is replaced when a run restarts from a
/// checkpoint rather than from the beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    InputFile,
    Ingest,
    Enrichment,
    Strata,
    ImputationApplyFactors,
    AggregationCombiner,
}

impl PipelineStage {
    pub fn from_checkpoint(checkpoint: u64) -> Option<Self> {
        match checkpoint {
            0 => Some(Self::InputFile),
            1 => Some(Self::Ingest),
            2 => Some(Self::Enrichment),
            3 => Some(Self::Strata),
            4 => Some(Self::ImputationApplyFactors),
            5 => Some(Self::AggregationCombiner),
            _ => None,
        }
    }

    /// Key under the payload's `file_names` mapping naming this stage's
    /// input file.
    pub fn file_name_key(self) -> &'static str {
        match self {
            Self::InputFile => "input_file",
            Self::Ingest => "ingest",
            Self::Enrichment => "enrichment",
            Self::Strata => "strata",
            Self::ImputationApplyFactors => "imputation_apply_factors",
            Self::AggregationCombiner => "aggregation_combiner",
        }
    }
}

/// Points the stage selected by `checkpoint` at `start_file` by rewriting
/// the payload's `file_names` mapping. The mapping is created when absent;
/// entries for other stages are left intact.
pub fn set_checkpoint_start_file(
    payload: &mut Payload,
    checkpoint: u64,
    start_file: &str,
) -> Result<(), DispatchError> {
    let stage = PipelineStage::from_checkpoint(checkpoint).ok_or_else(|| {
        DispatchError::Checkpoint {
            message: format!("no pipeline stage for checkpoint {checkpoint}"),
        }
    })?;

    let file_names = payload
        .entry("file_names".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let file_names = file_names
        .as_object_mut()
        .ok_or_else(|| DispatchError::Checkpoint {
            message: "payload field 'file_names' is not a JSON mapping".to_string(),
        })?;

    file_names.insert(
        stage.file_name_key().to_string(),
        Value::String(start_file.to_string()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        value.as_object().expect("test payload must be an object").clone()
    }

    #[test]
    fn maps_each_checkpoint_to_its_stage_file_key() {
        let expected = [
            (0, "input_file"),
            (1, "ingest"),
            (2, "enrichment"),
            (3, "strata"),
            (4, "imputation_apply_factors"),
            (5, "aggregation_combiner"),
        ];
        for (checkpoint, key) in expected {
            let stage = PipelineStage::from_checkpoint(checkpoint).expect("stage exists");
            assert_eq!(stage.file_name_key(), key);
        }
    }

    #[test]
    fn sets_start_file_for_selected_stage_only() {
        let mut merged = payload(json!({
            "survey": "BMISG",
            "file_names": {"ingest": "previous_ingest.json"},
        }));

        set_checkpoint_start_file(&mut merged, 4, "restart.json").expect("valid checkpoint");

        assert_eq!(
            merged.get("file_names"),
            Some(&json!({
                "ingest": "previous_ingest.json",
                "imputation_apply_factors": "restart.json",
            }))
        );
    }

    #[test]
    fn creates_file_names_mapping_when_absent() {
        let mut merged = payload(json!({"survey": "BMISG"}));

        set_checkpoint_start_file(&mut merged, 0, "start.json").expect("valid checkpoint");

        assert_eq!(merged.get("file_names"), Some(&json!({"input_file": "start.json"})));
    }

    #[test]
    fn unknown_checkpoint_is_rejected() {
        let mut merged = payload(json!({}));
        let error =
            set_checkpoint_start_file(&mut merged, 9, "start.json").expect_err("no stage 9");
        assert!(matches!(error, DispatchError::Checkpoint { .. }));
    }

    #[test]
    fn non_mapping_file_names_is_rejected() {
        let mut merged = payload(json!({"file_names": "not-a-mapping"}));
        let error =
            set_checkpoint_start_file(&mut merged, 1, "start.json").expect_err("bad file_names");
        assert!(matches!(error, DispatchError::Checkpoint { .. }));
    }
}
