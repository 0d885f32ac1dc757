/// The stages of a single round, in the order they run. `NaturalCheck` and `AgentActions`
/// may skip straight to `Cleanup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ShoeCheck,
    AgentArrival,
    BetCollection,
    Deal,
    NaturalCheck,
    PlayerActions,
    AgentActions,
    DealerDraw,
    Showdown,
    Cleanup,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Cleanup)
    }
}
