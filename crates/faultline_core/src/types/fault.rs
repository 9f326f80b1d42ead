//! Single stuck-at fault model.

use super::logic::LogicValue;
use serde::{Deserialize, Serialize};

/// The stuck polarity of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StuckAt {
    Zero,
    One,
}

impl StuckAt {
    /// The stuck rail as a plain bit.
    pub fn as_bool(&self) -> bool {
        matches!(self, StuckAt::One)
    }

    /// The stuck value as a logic constant.
    pub fn as_logic(&self) -> LogicValue {
        LogicValue::from_bit(self.as_bool())
    }

    /// The value the fault site must be driven to so that a fault effect
    /// appears there: the opposite of the stuck value.
    pub fn activation_value(&self) -> LogicValue {
        self.as_logic().inverse()
    }
}

impl std::fmt::Display for StuckAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.as_bool() { 1 } else { 0 })
    }
}

/// A single stuck-at fault on a named net.
///
/// # Example
///
/// ```
/// use faultline_core::types::{Fault, StuckAt};
///
/// let fault = Fault::new("22", StuckAt::One);
/// assert_eq!(fault.to_string(), "22/sa1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fault {
    /// Net name of the fault site
    pub net: String,
    /// Stuck polarity
    pub stuck: StuckAt,
}

impl Fault {
    pub fn new(net: impl Into<String>, stuck: StuckAt) -> Self {
        Self {
            net: net.into(),
            stuck,
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/sa{}", self.net, self.stuck)
    }
}
