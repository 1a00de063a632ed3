/// Generation number attached to every outgoing prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens; only the latest one may update the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionTracker {
    latest: u64,
}

impl SubmissionTracker {
    /// Returns the tracker after issuing, together with the new token.
    pub fn issue(self) -> (Self, RequestToken) {
        let latest = self.latest + 1;
        (Self { latest }, RequestToken(latest))
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest != 0 && token.0 == self.latest
    }
}
