//! Transfer function derivation for a unity-feedback loop.

use serde::Serialize;
use tf_core::Real;
use tf_expr::{ConstantTable, ExprError, LoopVariable, Value, evaluate, substitute};
use tf_poly::{Polynomial, RationalFunction};
use tracing::debug;

use crate::block::{Block, BlockRef, Side, TermLocation};
use crate::error::{ControlError, ControlResult};
use crate::spec::TransferFunctionSpec;

/// All five transfer functions computed from one snapshot of the constants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivation {
    /// `C(s)`
    pub controller: RationalFunction,
    /// `P(s)`, product of the plant cascade.
    pub plants: RationalFunction,
    /// `L(s) = C(s) P(s)`
    pub open_loop: RationalFunction,
    /// `W(s) = L / (1 + L)`
    pub closed_loop: RationalFunction,
    /// `Ed(s) = P / (1 + L)`
    pub disturbance: RationalFunction,
}

/// Derives controller, plant, open-loop, closed-loop and disturbance
/// transfer functions from a [`TransferFunctionSpec`].
///
/// The model owns its constant table. Blocks cannot change after
/// construction; constants can, through [`set_constant`](Self::set_constant).
/// Nothing derived is cached.
#[derive(Debug, Clone)]
pub struct TransferFunctionModel {
    spec: TransferFunctionSpec,
}

impl TransferFunctionModel {
    pub fn new(spec: TransferFunctionSpec) -> ControlResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &TransferFunctionSpec {
        &self.spec
    }

    pub fn loop_variable(&self) -> &LoopVariable {
        &self.spec.loop_variable
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.spec.constants
    }

    pub fn constant(&self, name: &str) -> ControlResult<Real> {
        Ok(self.spec.constants.get(name)?)
    }

    /// Overwrite an existing constant, returning the previous value.
    ///
    /// An unknown name yields [`ControlError::UnknownConstant`] and leaves the
    /// table unchanged.
    pub fn set_constant(&mut self, name: &str, value: Real) -> ControlResult<Real> {
        let previous = self.spec.constants.set(name, value)?;
        debug!(constant = name, previous, value, "constant updated");
        Ok(previous)
    }

    /// `C(s)` from the controller block.
    pub fn controller(&self) -> ControlResult<RationalFunction> {
        self.block_rational(&self.spec.controller, BlockRef::Controller)
    }

    /// A single plant stage, by zero-based cascade index.
    pub fn plant(&self, index: usize) -> ControlResult<RationalFunction> {
        let block = self.spec.plants.get(index).ok_or(ControlError::InvalidArg {
            what: "plant index out of range",
        })?;
        self.block_rational(block, plant_ref(index, block))
    }

    /// `P(s)`: all plants in series, starting from `[1] / [1]`.
    pub fn plants(&self) -> ControlResult<RationalFunction> {
        let mut combined = RationalFunction::identity();
        for (index, block) in self.spec.plants.iter().enumerate() {
            let stage = self.block_rational(block, plant_ref(index, block))?;
            combined = combined.cascade(&stage);
        }
        Ok(combined)
    }

    /// `L(s) = C(s) P(s)`.
    pub fn open_loop(&self) -> ControlResult<RationalFunction> {
        Ok(open_loop_of(&self.controller()?, &self.plants()?))
    }

    /// `W(s) = L_num / (L_den + L_num)`.
    pub fn closed_loop(&self) -> ControlResult<RationalFunction> {
        Ok(self.open_loop()?.unity_feedback())
    }

    /// `Ed(s) = P_num / (P_den (L_den + L_num))`.
    pub fn disturbance(&self) -> ControlResult<RationalFunction> {
        let plants = self.plants()?;
        let open_loop = open_loop_of(&self.controller()?, &plants);
        Ok(disturbance_of(&plants, &open_loop))
    }

    /// Every transfer function from a single evaluation of the blocks.
    pub fn derive(&self) -> ControlResult<Derivation> {
        let controller = self.controller()?;
        let plants = self.plants()?;
        let open_loop = open_loop_of(&controller, &plants);
        let closed_loop = open_loop.unity_feedback();
        let disturbance = disturbance_of(&plants, &open_loop);

        let var = self.spec.loop_variable.name();
        debug!(open_loop = %open_loop.display(var), "derived open loop");
        debug!(closed_loop = %closed_loop.display(var), "derived closed loop");
        debug!(disturbance = %disturbance.display(var), "derived disturbance response");

        Ok(Derivation {
            controller,
            plants,
            open_loop,
            closed_loop,
            disturbance,
        })
    }

    fn block_rational(&self, block: &Block, block_ref: BlockRef) -> ControlResult<RationalFunction> {
        let numerator = build_polynomial(
            block.terms(Side::Numerator),
            &self.spec.constants,
            &self.spec.loop_variable,
            &block_ref,
            Side::Numerator,
        )?;
        let denominator = build_polynomial(
            block.terms(Side::Denominator),
            &self.spec.constants,
            &self.spec.loop_variable,
            &block_ref,
            Side::Denominator,
        )?;
        Ok(RationalFunction::new(numerator, denominator))
    }
}

fn plant_ref(index: usize, block: &Block) -> BlockRef {
    BlockRef::Plant {
        index,
        name: block.name.clone(),
    }
}

fn open_loop_of(controller: &RationalFunction, plants: &RationalFunction) -> RationalFunction {
    controller.cascade(plants)
}

fn disturbance_of(plants: &RationalFunction, open_loop: &RationalFunction) -> RationalFunction {
    RationalFunction::new(
        plants.numerator().clone(),
        plants.denominator() * &open_loop.return_difference(),
    )
}

/// Substitute, evaluate, and place each term as a coefficient.
///
/// Term `i` of `N` becomes the coefficient of power `N - 1 - i`. Every term
/// must reduce to a scalar; a term that still depends on the loop variable
/// is rejected rather than guessing which power it was meant to occupy.
pub fn build_polynomial(
    terms: &[String],
    constants: &ConstantTable,
    variable: &LoopVariable,
    block: &BlockRef,
    side: Side,
) -> ControlResult<Polynomial> {
    let mut coeffs = Vec::with_capacity(terms.len());

    for (index, term) in terms.iter().enumerate() {
        let location = TermLocation {
            block: block.clone(),
            side,
            index,
        };
        let substituted = substitute(term, constants);
        let value = evaluate(&substituted, variable).map_err(|err| match err {
            ExprError::UnresolvedReference { name } => {
                ControlError::UnresolvedReference { location: location.clone(), name }
            }
            source => ControlError::Expression {
                location: location.clone(),
                expression: term.clone(),
                source,
            },
        })?;

        match value {
            Value::Scalar(v) => coeffs.push(v),
            Value::Symbolic(_) => {
                return Err(ControlError::Expression {
                    location,
                    expression: term.clone(),
                    source: ExprError::NonPolynomial {
                        what: "term depends on the loop variable; list coefficients by power instead",
                    },
                });
            }
        }
    }

    Ok(Polynomial::from_terms(coeffs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_model() -> TransferFunctionModel {
        let constants = ConstantTable::from_pairs([("Kp", 2.0)]).unwrap();
        let spec = TransferFunctionSpec::new(
            Block::new(["Kp"], ["1"]),
            vec![Block::new(["1"], ["1", "1"])],
            constants,
        );
        TransferFunctionModel::new(spec).unwrap()
    }

    #[test]
    fn proportional_loop_around_first_order_plant() {
        let model = example_model();

        let c = model.controller().unwrap();
        assert_eq!(c.numerator().coeffs(), &[2.0]);
        assert_eq!(c.denominator().coeffs(), &[1.0]);

        let p = model.plants().unwrap();
        assert_eq!(p.numerator().coeffs(), &[1.0]);
        assert_eq!(p.denominator().coeffs(), &[1.0, 1.0]);

        let l = model.open_loop().unwrap();
        assert_eq!(l.numerator().coeffs(), &[2.0]);
        assert_eq!(l.denominator().coeffs(), &[1.0, 1.0]);

        let w = model.closed_loop().unwrap();
        assert_eq!(w.numerator().coeffs(), &[2.0]);
        assert_eq!(w.denominator().coeffs(), &[1.0, 3.0]);

        let ed = model.disturbance().unwrap();
        assert_eq!(ed.numerator().coeffs(), &[1.0]);
        assert_eq!(ed.denominator().coeffs(), &[1.0, 4.0, 3.0]);
    }

    #[test]
    fn derive_matches_individual_operations() {
        let model = example_model();
        let d = model.derive().unwrap();
        assert_eq!(d.controller, model.controller().unwrap());
        assert_eq!(d.plants, model.plants().unwrap());
        assert_eq!(d.open_loop, model.open_loop().unwrap());
        assert_eq!(d.closed_loop, model.closed_loop().unwrap());
        assert_eq!(d.disturbance, model.disturbance().unwrap());
    }

    #[test]
    fn no_plants_means_unit_plant() {
        let spec = TransferFunctionSpec::new(
            Block::new(["3"], ["1"]),
            vec![],
            ConstantTable::new(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        assert_eq!(model.plants().unwrap(), RationalFunction::identity());
        assert_eq!(model.closed_loop().unwrap().denominator().coeffs(), &[4.0]);
    }

    #[test]
    fn set_constant_is_seen_by_next_derivation() {
        let mut model = example_model();
        assert_eq!(model.set_constant("Kp", 5.0).unwrap(), 2.0);
        let w = model.closed_loop().unwrap();
        assert_eq!(w.numerator().coeffs(), &[5.0]);
        assert_eq!(w.denominator().coeffs(), &[1.0, 6.0]);
    }

    #[test]
    fn set_unknown_constant_is_recoverable() {
        let mut model = example_model();
        let err = model.set_constant("Ki", 1.0).unwrap_err();
        assert_eq!(
            err,
            ControlError::UnknownConstant {
                name: "Ki".to_string()
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(model.constants().len(), 1);
        assert_eq!(model.constant("Kp").unwrap(), 2.0);
    }

    #[test]
    fn unresolved_reference_reports_location() {
        let spec = TransferFunctionSpec::new(
            Block::new(["Kp"], ["1"]),
            vec![Block::new(["1"], ["tau", "1"]).with_name("motor")],
            ConstantTable::from_pairs([("Kp", 1.0)]).unwrap(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        let err = model.plants().unwrap_err();
        assert_eq!(
            err,
            ControlError::UnresolvedReference {
                location: TermLocation {
                    block: BlockRef::Plant {
                        index: 0,
                        name: Some("motor".to_string())
                    },
                    side: Side::Denominator,
                    index: 0,
                },
                name: "tau".to_string(),
            }
        );
        // The controller does not reference `tau` and still derives.
        assert!(model.controller().is_ok());
        assert!(model.open_loop().is_err());
    }

    #[test]
    fn malformed_term_is_expression_error() {
        let spec = TransferFunctionSpec::new(
            Block::new(["2 *"], ["1"]),
            vec![],
            ConstantTable::new(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        assert!(matches!(
            model.controller(),
            Err(ControlError::Expression {
                source: ExprError::UnexpectedEnd,
                ..
            })
        ));
    }

    #[test]
    fn overflowing_literal_is_expression_error() {
        let spec = TransferFunctionSpec::new(
            Block::new(["1e999"], ["1"]),
            vec![Block::new(["1"], ["1", "1"])],
            ConstantTable::new(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        assert!(matches!(
            model.derive(),
            Err(ControlError::Expression {
                source: ExprError::Numeric(_),
                ..
            })
        ));
    }

    #[test]
    fn term_containing_loop_variable_is_rejected() {
        let spec = TransferFunctionSpec::new(
            Block::new(["1"], ["s + 1"]),
            vec![],
            ConstantTable::new(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        assert!(matches!(
            model.controller(),
            Err(ControlError::Expression {
                source: ExprError::NonPolynomial { .. },
                ..
            })
        ));
    }

    #[test]
    fn empty_block_yields_zero_polynomial() {
        let spec = TransferFunctionSpec::new(
            Block::new(Vec::<String>::new(), ["1"]),
            vec![Block::new(["1"], Vec::<String>::new())],
            ConstantTable::new(),
        );
        let model = TransferFunctionModel::new(spec).unwrap();
        let c = model.controller().unwrap();
        assert!(c.numerator().is_empty());

        let p = model.plants().unwrap();
        assert!(p.has_degenerate_denominator());

        // Derivation still succeeds; the degenerate denominator is the caller's concern.
        let d = model.derive().unwrap();
        assert!(d.open_loop.numerator().is_empty());
        assert!(d.disturbance.has_degenerate_denominator());
    }

    #[test]
    fn plant_index_out_of_range() {
        let model = example_model();
        assert!(model.plant(0).is_ok());
        assert!(matches!(
            model.plant(1),
            Err(ControlError::InvalidArg { .. })
        ));
    }
}
