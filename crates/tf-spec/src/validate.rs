//! Loop description validation.

use tf_expr::is_identifier;

use crate::schema::{BlockDef, TransferSpecDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid identifier {name:?} in {context}")]
    InvalidIdentifier { name: String, context: String },

    #[error("Constant {name:?} shadows the loop variable")]
    ShadowedLoopVariable { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("At least one plant is required")]
    NoPlants,

    #[error("Empty denominator in {block}")]
    EmptyDenominator { block: String },

    #[error("Empty term in {block} {side} at index {index}")]
    EmptyTerm {
        block: String,
        side: &'static str,
        index: usize,
    },
}

pub fn validate_spec(spec: &TransferSpecDef) -> Result<(), ValidationError> {
    if spec.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: spec.version,
        });
    }

    if !is_identifier(&spec.loop_variable) {
        return Err(ValidationError::InvalidIdentifier {
            name: spec.loop_variable.clone(),
            context: "loop_variable".to_string(),
        });
    }

    for (name, value) in &spec.constants {
        if !is_identifier(name) {
            return Err(ValidationError::InvalidIdentifier {
                name: name.clone(),
                context: "constants".to_string(),
            });
        }
        if *name == spec.loop_variable {
            return Err(ValidationError::ShadowedLoopVariable { name: name.clone() });
        }
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("constants.{name}"),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    if spec.plants.is_empty() {
        return Err(ValidationError::NoPlants);
    }

    validate_block(&spec.controller, "controller".to_string())?;
    for (index, plant) in spec.plants.iter().enumerate() {
        let label = match &plant.name {
            Some(name) => format!("plant {index} ({name})"),
            None => format!("plant {index}"),
        };
        validate_block(plant, label)?;
    }

    Ok(())
}

fn validate_block(block: &BlockDef, label: String) -> Result<(), ValidationError> {
    if block.denominator.is_empty() {
        return Err(ValidationError::EmptyDenominator { block: label });
    }
    for (side, terms) in [("numerator", &block.numerator), ("denominator", &block.denominator)] {
        if let Some(index) = terms.iter().position(|t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyTerm {
                block: label,
                side,
                index,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn base() -> TransferSpecDef {
        TransferSpecDef {
            version: 1,
            loop_variable: "s".to_string(),
            constants: BTreeMap::from([("Kp".to_string(), 2.0)]),
            controller: BlockDef::new(["Kp"], ["1"]),
            plants: vec![BlockDef::new(["1"], ["1", "1"])],
        }
    }

    #[test]
    fn accepts_minimal_loop() {
        validate_spec(&base()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut spec = base();
        spec.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        );
    }

    #[test]
    fn rejects_bad_names() {
        let mut spec = base();
        spec.constants.insert("2K".to_string(), 1.0);
        assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidIdentifier { .. })
        ));

        let mut spec = base();
        spec.loop_variable = "s-1".to_string();
        assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidIdentifier { .. })
        ));

        let mut spec = base();
        spec.constants.insert("s".to_string(), 1.0);
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::ShadowedLoopVariable {
                name: "s".to_string()
            })
        );
    }

    #[test]
    fn rejects_non_finite_constant() {
        let mut spec = base();
        spec.constants.insert("Kp".to_string(), f64::NAN);
        assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn requires_a_plant() {
        let mut spec = base();
        spec.plants.clear();
        assert_eq!(validate_spec(&spec), Err(ValidationError::NoPlants));
    }

    #[test]
    fn empty_numerator_allowed_empty_denominator_rejected() {
        let mut spec = base();
        spec.controller.numerator.clear();
        validate_spec(&spec).unwrap();

        spec.plants[0].denominator.clear();
        spec.plants[0].name = Some("motor".to_string());
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::EmptyDenominator {
                block: "plant 0 (motor)".to_string()
            })
        );
    }

    #[test]
    fn rejects_blank_term() {
        let mut spec = base();
        spec.plants[0].denominator[1] = "  ".to_string();
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::EmptyTerm {
                block: "plant 0".to_string(),
                side: "denominator",
                index: 1,
            })
        );
    }
}
