use log::debug;

use super::builder::{build_ladder, Ladder};
use super::types::{Rank, Step, StepKey, Tier};
use crate::domain::PriceTable;
use crate::errors::TrackerError;

/// Ordered steps a pilot is paid for between two ranks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargedRange {
    steps: Vec<Step>,
}

impl ChargedRange {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn keys(&self) -> Vec<StepKey> {
        self.steps.iter().map(Step::key).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total(&self, prices: &PriceTable) -> f64 {
        sum_prices(&self.steps, prices)
    }
}

/// Parse free text such as `"Master I"`, `"Master-i"` or `"Legendary"`.
///
/// Splits on `-` when present, otherwise on whitespace. Rank names are
/// matched exactly; tier labels are upper-cased first. Tokens after the
/// second are ignored.
pub fn parse_step(text: &str) -> Option<Step> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens = tokenize(trimmed);
    match tokens.as_slice() {
        [single] => parse_peak(single),
        [rank, tier, ..] => parse_tiered(rank, tier),
        [] => None,
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    if text.contains('-') {
        text.split('-').map(str::trim).collect()
    } else {
        text.split_whitespace().collect()
    }
}

fn parse_peak(token: &str) -> Option<Step> {
    (token == Rank::PEAK.name()).then(Step::peak)
}

fn parse_tiered(rank: &str, tier: &str) -> Option<Step> {
    let rank = Rank::tiered_from_name(rank)?;
    let tier = Tier::from_label(&tier.to_uppercase())?;
    Step::tiered(rank, tier)
}

/// Resolve a range on the Call of Duty: Mobile ladder
pub fn resolve_range(start: &str, end: &str) -> Result<ChargedRange, TrackerError> {
    resolve_range_in(&build_ladder(), start, end)
}

/// Steps from the lower of the two inputs up to, but excluding, the higher.
///
/// Input order does not matter. Equal inputs give an empty range.
pub fn resolve_range_in(
    ladder: &Ladder,
    start: &str,
    end: &str,
) -> Result<ChargedRange, TrackerError> {
    let start_step = parse_input(start)?;
    let end_step = parse_input(end)?;

    let start_idx = locate(ladder, &start_step)?;
    let end_idx = locate(ladder, &end_step)?;

    let lower = start_idx.min(end_idx);
    let upper = start_idx.max(end_idx);

    // The end boundary is reached, not climbed out of, so it is never charged.
    let steps = ladder.steps()[lower..upper].to_vec();
    debug!("Resolved {start_step} .. {end_step} to {} steps", steps.len());

    Ok(ChargedRange { steps })
}

fn parse_input(text: &str) -> Result<Step, TrackerError> {
    parse_step(text).ok_or_else(|| {
        TrackerError::invalid(format!(
            "'{}' is not a valid rank (e.g. \"Master I\")",
            text.trim()
        ))
    })
}

fn locate(ladder: &Ladder, step: &Step) -> Result<usize, TrackerError> {
    ladder
        .position(step)
        .ok_or_else(|| TrackerError::UnsupportedStep(step.key()))
}

/// Sum configured prices; steps without a price add nothing.
pub fn sum_prices(steps: &[Step], prices: &PriceTable) -> f64 {
    steps
        .iter()
        .filter_map(|step| prices.get(&step.key()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(range: &ChargedRange) -> Vec<String> {
        range.keys()
    }

    #[test]
    fn test_parse_step_accepts_space_and_hyphen_forms() {
        let expected = Step::tiered(Rank::Master, Tier::II);
        assert_eq!(parse_step("Master II"), expected);
        assert_eq!(parse_step("  Master-II "), expected);
        assert_eq!(parse_step("Master - ii"), expected);
        assert_eq!(parse_step("Legendary"), Some(Step::peak()));
    }

    #[test]
    fn test_parse_step_rejects_bad_text() {
        assert_eq!(parse_step("bogus"), None);
        assert_eq!(parse_step("Master-IX"), None);
        assert_eq!(parse_step(""), None);
        assert_eq!(parse_step("   "), None);
        assert_eq!(parse_step("master I"), None);
        assert_eq!(parse_step("Master"), None);
        assert_eq!(parse_step("Legendary I"), None);
        assert_eq!(parse_step("Legendary-"), None);
    }

    #[test]
    fn test_range_excludes_end_tier() {
        let range = resolve_range("Master I", "Grandmaster I").unwrap();
        assert_eq!(
            keys(&range),
            vec!["Master-I", "Master-II", "Master-III", "Master-IV", "Master-V"]
        );
    }

    #[test]
    fn test_range_into_peak_excludes_peak() {
        let range = resolve_range("Grandmaster V", "Legendary").unwrap();
        assert_eq!(keys(&range), vec!["Grandmaster-V"]);
    }

    #[test]
    fn test_range_is_direction_agnostic() {
        let forward = resolve_range("Elite III", "Pro II").unwrap();
        let backward = resolve_range("Pro II", "Elite III").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 4);
    }

    #[test]
    fn test_same_start_and_end_is_empty_with_zero_total() {
        let prices = PriceTable::from_pairs([("Master-I", 10.0)]);
        for text in ["Master I", "Legendary", "Rookie-I"] {
            let range = resolve_range(text, text).unwrap();
            assert!(range.is_empty());
            assert_eq!(range.total(&prices), 0.0);
        }
    }

    #[test]
    fn test_invalid_text_is_reported_as_invalid_input() {
        let err = resolve_range("bogus", "Master I").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));

        let err = resolve_range("Master I", "Master-IX").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
    }

    #[test]
    fn test_step_missing_from_ladder_is_unsupported() {
        let ladder = Ladder::from_steps(vec![Step::tiered(Rank::Pro, Tier::I).unwrap()]);
        let err = resolve_range_in(&ladder, "Pro I", "Master I").unwrap_err();
        assert_eq!(err, TrackerError::UnsupportedStep("Master-I".into()));
    }

    #[test]
    fn test_missing_prices_count_as_zero() {
        let prices = PriceTable::from_pairs([("Master-I", 10.0), ("Master-II", 15.0)]);
        let steps: Vec<Step> = ["Master-I", "Master-II", "Master-III"]
            .into_iter()
            .filter_map(Step::from_key)
            .collect();

        assert_eq!(sum_prices(&steps, &prices), 25.0);
    }
}
