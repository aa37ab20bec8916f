// ── Verdict text ──

use crate::capability::CapabilityState;
use crate::serial::SerialNumber;

/// Fixed sentence for each capability state, naming the serial.
pub fn render(serial: &SerialNumber, state: CapabilityState) -> String {
    match state {
        CapabilityState::Absent => format!(
            "Controller with serial number {serial} is NOT running correct FW and packages to work with doorbell. Reason: WebRTC v2 is not installed"
        ),
        CapabilityState::PresentOff => format!(
            "Controller with serial number {serial} is NOT running correct FW and packages to work with doorbell. Reason: WebRTC v2 is off"
        ),
        CapabilityState::PresentOn => format!(
            "Controller with serial number {serial} is running correct FW and packages to work with doorbell. Reason: WebRTC v2 is installed and on"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn serial() -> SerialNumber {
        match "92001234".parse() {
            Ok(s) => s,
            Err(e) => panic!("fixture serial invalid: {e}"),
        }
    }

    #[test]
    fn absent() {
        assert_eq!(
            render(&serial(), CapabilityState::Absent),
            "Controller with serial number 92001234 is NOT running correct FW and packages to work with doorbell. Reason: WebRTC v2 is not installed"
        );
    }

    #[test]
    fn present_off() {
        assert_eq!(
            render(&serial(), CapabilityState::PresentOff),
            "Controller with serial number 92001234 is NOT running correct FW and packages to work with doorbell. Reason: WebRTC v2 is off"
        );
    }

    #[test]
    fn present_on() {
        assert_eq!(
            render(&serial(), CapabilityState::PresentOn),
            "Controller with serial number 92001234 is running correct FW and packages to work with doorbell. Reason: WebRTC v2 is installed and on"
        );
    }
}
