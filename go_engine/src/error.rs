use std::fmt;

/// Reason a submitted action was rejected. Never wraps I/O — the rules engine
/// is a pure function over in-memory state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    NotYourTurn,
    OutOfBounds,
    OccupiedPoint,
    Suicide,
    Ko,
    WrongPhase,
    ProposalPending,
    NoProposal,
    CannotRespondToOwnProposal,
    EmptyPoint,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RuleViolation::NotYourTurn => "it is not your turn",
            RuleViolation::OutOfBounds => "point is outside the board",
            RuleViolation::OccupiedPoint => "point is already occupied",
            RuleViolation::Suicide => "move would be self-capture with no gain",
            RuleViolation::Ko => "move would recreate the previous board position",
            RuleViolation::WrongPhase => "action is not valid in the current phase",
            RuleViolation::ProposalPending => "a proposal is already awaiting a response",
            RuleViolation::NoProposal => "there is no proposal to respond to",
            RuleViolation::CannotRespondToOwnProposal => {
                "cannot accept or reject your own proposal"
            }
            RuleViolation::EmptyPoint => "point has no stone to mark",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for RuleViolation {}

#[derive(Debug)]
pub struct DecodeError(pub(crate) postcard::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode game blob: {}", self.0)
    }
}

impl std::error::Error for DecodeError {}
