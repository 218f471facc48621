// crates/campus-care-server/src/crisis/safety.rs
// Fixed safety disclosure returned instead of a model reply

/// Never model-generated. Keep hotline numbers current.
pub const CRISIS_REPLY: &str = "It sounds like you're going through something really painful, \
and I'm glad you reached out. You don't have to handle this alone.\n\n\
If you are in immediate danger, please call your local emergency number (112 or 911) right now \
or go to the nearest emergency room.\n\n\
You can talk to someone any time:\n\
- Tele-MANAS (India): 14416 or 1-800-891-4416\n\
- KIRAN Mental Health Helpline (India): 1800-599-0019\n\
- 988 Suicide & Crisis Lifeline (US): call or text 988\n\n\
Your campus counseling center can also see you today. Would you like help booking a counselor?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_reply_mentions_emergency_services() {
        assert!(CRISIS_REPLY.contains("emergency"));
        assert!(CRISIS_REPLY.contains("988"));
        assert!(CRISIS_REPLY.contains("14416"));
    }
}
