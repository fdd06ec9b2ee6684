use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;
use crate::models::Regime;

/// One slab of a progressive schedule: income in `[min_income, max_income)`
/// is taxed at `rate_percent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// `None` for the open-ended top slab.
    pub max_income: Option<Decimal>,
    /// Marginal rate as a percentage (`5` means 5%).
    pub rate_percent: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            rate_percent,
        }
    }

    /// Portion of `taxable_income` that falls inside this bracket.
    ///
    /// Zero when income is below the lower bound, the full width when it is
    /// above the upper bound.
    pub fn taxable_portion(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let above_floor = (taxable_income - self.min_income).max(Decimal::ZERO);
        match self.max_income {
            Some(max) => above_floor.min(max - self.min_income),
            None => above_floor,
        }
    }
}

/// Ordered, contiguous set of brackets for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable(Vec<TaxBracket>);

impl BracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxBracket> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the structural invariants the bracket walk relies on.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] if the table is empty, does not start at 0,
    /// has gaps or overlaps, is not open-ended at the top, has a rate outside
    /// `[0, 100]`, or has a rate lower than the bracket before it.
    pub fn validate(
        &self,
        regime: Regime,
    ) -> Result<(), RuleSetError> {
        let Some(first) = self.0.first() else {
            return Err(RuleSetError::EmptyBracketTable(regime));
        };
        if first.min_income != Decimal::ZERO {
            return Err(RuleSetError::FirstBracketNotZero {
                regime,
                min: first.min_income,
            });
        }

        let hundred = Decimal::ONE_HUNDRED;
        let last_index = self.0.len() - 1;
        let mut previous: Option<&TaxBracket> = None;

        for (index, bracket) in self.0.iter().enumerate() {
            if bracket.rate_percent < Decimal::ZERO || bracket.rate_percent > hundred {
                return Err(RuleSetError::InvalidRate {
                    regime,
                    index,
                    rate: bracket.rate_percent,
                });
            }

            if let Some(prev) = previous {
                // Checked against the previous bracket's bound; an unbounded
                // previous bracket has already been rejected below.
                if let Some(expected) = prev.max_income {
                    if bracket.min_income != expected {
                        return Err(RuleSetError::NotContiguous {
                            regime,
                            index,
                            expected,
                            found: bracket.min_income,
                        });
                    }
                }
                if bracket.rate_percent < prev.rate_percent {
                    return Err(RuleSetError::DecreasingRate {
                        regime,
                        index,
                        rate: bracket.rate_percent,
                    });
                }
            }

            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(RuleSetError::EmptyBracket { regime, index });
                }
                Some(_) if index == last_index => {
                    return Err(RuleSetError::BoundedLastBracket(regime));
                }
                None if index != last_index => {
                    return Err(RuleSetError::UnboundedBeforeEnd { regime, index });
                }
                _ => {}
            }

            previous = Some(bracket);
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a BracketTable {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn table(brackets: &[(Decimal, Option<Decimal>, Decimal)]) -> BracketTable {
        BracketTable::new(
            brackets
                .iter()
                .map(|&(min, max, rate)| TaxBracket::new(min, max, rate))
                .collect(),
        )
    }

    fn valid_table() -> BracketTable {
        table(&[
            (dec!(0), Some(dec!(250000)), dec!(0)),
            (dec!(250000), Some(dec!(500000)), dec!(5)),
            (dec!(500000), None, dec!(20)),
        ])
    }

    // =========================================================================
    // taxable_portion tests
    // =========================================================================

    #[test]
    fn taxable_portion_is_zero_below_lower_bound() {
        let bracket = TaxBracket::new(dec!(400000), Some(dec!(800000)), dec!(5));

        assert_eq!(bracket.taxable_portion(dec!(300000)), dec!(0));
    }

    #[test]
    fn taxable_portion_is_partial_inside_bracket() {
        let bracket = TaxBracket::new(dec!(800000), Some(dec!(1200000)), dec!(10));

        assert_eq!(bracket.taxable_portion(dec!(925000)), dec!(125000));
    }

    #[test]
    fn taxable_portion_is_full_width_above_upper_bound() {
        let bracket = TaxBracket::new(dec!(400000), Some(dec!(800000)), dec!(5));

        assert_eq!(bracket.taxable_portion(dec!(2000000)), dec!(400000));
    }

    #[test]
    fn taxable_portion_at_exact_bounds() {
        let bracket = TaxBracket::new(dec!(400000), Some(dec!(800000)), dec!(5));

        assert_eq!(bracket.taxable_portion(dec!(400000)), dec!(0));
        assert_eq!(bracket.taxable_portion(dec!(800000)), dec!(400000));
    }

    #[test]
    fn taxable_portion_unbounded_bracket_has_no_ceiling() {
        let bracket = TaxBracket::new(dec!(2400000), None, dec!(30));

        assert_eq!(bracket.taxable_portion(dec!(10000000)), dec!(7600000));
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_well_formed_table() {
        assert_eq!(valid_table().validate(Regime::Old), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_table() {
        let result = BracketTable::new(vec![]).validate(Regime::New);

        assert_eq!(result, Err(RuleSetError::EmptyBracketTable(Regime::New)));
    }

    #[test]
    fn validate_rejects_nonzero_start() {
        let result = table(&[(dec!(100), None, dec!(5))]).validate(Regime::Old);

        assert_eq!(
            result,
            Err(RuleSetError::FirstBracketNotZero {
                regime: Regime::Old,
                min: dec!(100),
            })
        );
    }

    #[test]
    fn validate_rejects_gap_between_brackets() {
        let result = table(&[
            (dec!(0), Some(dec!(250000)), dec!(0)),
            (dec!(300000), None, dec!(5)),
        ])
        .validate(Regime::Old);

        assert_eq!(
            result,
            Err(RuleSetError::NotContiguous {
                regime: Regime::Old,
                index: 1,
                expected: dec!(250000),
                found: dec!(300000),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_last_bracket() {
        let result = table(&[(dec!(0), Some(dec!(250000)), dec!(0))]).validate(Regime::New);

        assert_eq!(result, Err(RuleSetError::BoundedLastBracket(Regime::New)));
    }

    #[test]
    fn validate_rejects_unbounded_middle_bracket() {
        let result = table(&[
            (dec!(0), None, dec!(0)),
            (dec!(250000), None, dec!(5)),
        ])
        .validate(Regime::New);

        assert_eq!(
            result,
            Err(RuleSetError::UnboundedBeforeEnd {
                regime: Regime::New,
                index: 0,
            })
        );
    }

    #[test]
    fn validate_rejects_decreasing_rate() {
        let result = table(&[
            (dec!(0), Some(dec!(250000)), dec!(10)),
            (dec!(250000), None, dec!(5)),
        ])
        .validate(Regime::Old);

        assert_eq!(
            result,
            Err(RuleSetError::DecreasingRate {
                regime: Regime::Old,
                index: 1,
                rate: dec!(5),
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_hundred() {
        let result = table(&[(dec!(0), None, dec!(120))]).validate(Regime::Old);

        assert_eq!(
            result,
            Err(RuleSetError::InvalidRate {
                regime: Regime::Old,
                index: 0,
                rate: dec!(120),
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let result = table(&[
            (dec!(0), Some(dec!(0)), dec!(0)),
            (dec!(0), None, dec!(5)),
        ])
        .validate(Regime::Old);

        assert_eq!(
            result,
            Err(RuleSetError::EmptyBracket {
                regime: Regime::Old,
                index: 0,
            })
        );
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = serde_json::to_value(valid_table()).unwrap();

        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
