use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of cash flow for an instruction.
///
/// A buy pays funds out; a sell brings funds in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Buy (`B`): the reporting entity pays out.
    Outgoing,
    /// Sell (`S`): the reporting entity receives funds.
    Incoming,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Outgoing, Side::Incoming];

    /// Single-letter instruction flag.
    pub fn flag(self) -> char {
        match self {
            Side::Outgoing => 'B',
            Side::Incoming => 'S',
        }
    }

    /// Trade action the side corresponds to.
    pub fn action(self) -> &'static str {
        match self {
            Side::Outgoing => "Buy",
            Side::Incoming => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Outgoing => write!(f, "outgoing"),
            Side::Incoming => write!(f, "incoming"),
        }
    }
}

/// Returned when text does not name a side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a side (expected B, S, Buy, Sell, Outgoing or Incoming)")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "buy" | "outgoing" => Ok(Side::Outgoing),
            "s" | "sell" | "incoming" => Ok(Side::Incoming),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        assert_eq!("B".parse::<Side>(), Ok(Side::Outgoing));
        assert_eq!("s".parse::<Side>(), Ok(Side::Incoming));
        assert_eq!("Sell".parse::<Side>(), Ok(Side::Incoming));
        assert_eq!(" outgoing ".parse::<Side>(), Ok(Side::Outgoing));
    }

    #[test]
    fn test_parse_rejects_other_text() {
        assert!("X".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_flag_and_action() {
        assert_eq!(Side::Outgoing.flag(), 'B');
        assert_eq!(Side::Incoming.action(), "Sell");
        for side in Side::ALL {
            assert_eq!(side.flag().to_string().parse::<Side>(), Ok(side));
        }
    }
}
