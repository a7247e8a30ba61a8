/// Lifecycle status of an intent.
///
/// `None` means no record exists. `Expired` is never stored: it is derived at read time from the
/// intent expiry (see [`IntentStatus::effective`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum IntentStatus {
    #[default]
    None = 0,
    Proposed = 1,
    Ready = 2,
    Executed = 3,
    Cancelled = 4,
    Expired = 5,
}

impl IntentStatus {
    /// Executed and Cancelled are absorbing.
    pub fn is_terminal(self) -> bool {
        matches!(self, IntentStatus::Executed | IntentStatus::Cancelled)
    }

    /// Fold time-based expiry into a stored status.
    pub fn effective(self, expiry: u64, now: u64) -> IntentStatus {
        match self {
            IntentStatus::Proposed | IntentStatus::Ready if now > expiry => IntentStatus::Expired,
            other => other,
        }
    }
}

impl From<IntentStatus> for u8 {
    fn from(status: IntentStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for IntentStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use IntentStatus::*;
        let status = match value {
            0 => None,
            1 => Proposed,
            2 => Ready,
            3 => Executed,
            4 => Cancelled,
            5 => Expired,
            _ => return Err(()),
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::IntentStatus;

    #[test]
    fn expiry_only_affects_live_statuses() {
        assert_eq!(IntentStatus::Proposed.effective(100, 101), IntentStatus::Expired);
        assert_eq!(IntentStatus::Ready.effective(100, 101), IntentStatus::Expired);
        assert_eq!(IntentStatus::Ready.effective(100, 100), IntentStatus::Ready);
        assert_eq!(IntentStatus::Executed.effective(100, 500), IntentStatus::Executed);
        assert_eq!(IntentStatus::Cancelled.effective(100, 500), IntentStatus::Cancelled);
    }

    #[test]
    fn status_codes_are_stable() {
        for code in 0u8..=5 {
            let status = IntentStatus::try_from(code).unwrap();
            assert_eq!(u8::from(status), code);
        }
        assert!(IntentStatus::try_from(6).is_err());
    }
}
