use super::types::{Rank, Step, StepKey, Tier};

/// The fixed total order of every chargeable step.
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    steps: Vec<Step>,
}

impl Ladder {
    #[cfg(test)]
    pub(crate) fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn position(&self, step: &Step) -> Option<usize> {
        self.steps.iter().position(|candidate| candidate == step)
    }

    pub fn keys(&self) -> Vec<StepKey> {
        self.steps.iter().map(Step::key).collect()
    }

    /// Steps that can carry a price: everything except the peak
    pub fn priceable(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|step| !step.is_peak())
    }
}

/// Tiered ranks ascending, tiers I to V within each, then the peak rank once.
pub fn build_ladder() -> Ladder {
    let mut steps: Vec<Step> = Rank::TIERED.into_iter().flat_map(tiers_of).collect();
    steps.push(Step::peak());

    Ladder { steps }
}

fn tiers_of(rank: Rank) -> impl Iterator<Item = Step> {
    Tier::ALL
        .into_iter()
        .filter_map(move |tier| Step::tiered(rank, tier))
}
