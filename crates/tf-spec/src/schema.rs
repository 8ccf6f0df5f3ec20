//! Loop description file schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tf_controls::{Block, TransferFunctionSpec};
use tf_expr::{ConstantTable, LoopVariable};

use crate::SpecResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferSpecDef {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_loop_variable")]
    pub loop_variable: String,
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,
    pub controller: BlockDef,
    #[serde(default)]
    pub plants: Vec<BlockDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Numerator terms, highest power first. Plain numbers are accepted and
    /// kept as their text.
    #[serde(rename = "num", deserialize_with = "deserialize_terms")]
    pub numerator: Vec<String>,
    #[serde(rename = "den", deserialize_with = "deserialize_terms")]
    pub denominator: Vec<String>,
}

fn default_version() -> u32 {
    crate::validate::LATEST_VERSION
}

fn default_loop_variable() -> String {
    LoopVariable::LAPLACE.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TermDef {
    Text(String),
    Number(f64),
}

fn deserialize_terms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let terms = Vec::<TermDef>::deserialize(deserializer)?;
    Ok(terms
        .into_iter()
        .map(|t| match t {
            TermDef::Text(text) => text,
            TermDef::Number(v) => v.to_string(),
        })
        .collect())
}

impl BlockDef {
    pub fn new<N, D>(numerator: N, denominator: D) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            name: None,
            numerator: numerator.into_iter().map(Into::into).collect(),
            denominator: denominator.into_iter().map(Into::into).collect(),
        }
    }

    fn to_block(&self) -> Block {
        Block {
            name: self.name.clone(),
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
        }
    }

    fn from_block(block: &Block) -> Self {
        Self {
            name: block.name.clone(),
            numerator: block.numerator.clone(),
            denominator: block.denominator.clone(),
        }
    }
}

impl TransferSpecDef {
    /// Build the in-memory loop description.
    ///
    /// Does not run file-level validation; [`crate::validate_spec`] does.
    pub fn to_spec(&self) -> SpecResult<TransferFunctionSpec> {
        let loop_variable = LoopVariable::new(&self.loop_variable)?;
        let constants =
            ConstantTable::from_pairs(self.constants.iter().map(|(k, v)| (k.as_str(), *v)))?;
        Ok(TransferFunctionSpec {
            controller: self.controller.to_block(),
            plants: self.plants.iter().map(BlockDef::to_block).collect(),
            constants,
            loop_variable,
        })
    }

    pub fn from_spec(spec: &TransferFunctionSpec) -> Self {
        Self {
            version: default_version(),
            loop_variable: spec.loop_variable.name().to_string(),
            constants: spec
                .constants
                .iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            controller: BlockDef::from_block(&spec.controller),
            plants: spec.plants.iter().map(BlockDef::from_block).collect(),
        }
    }
}
