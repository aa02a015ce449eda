use super::*;

#[test]
fn status_label_hidden_when_nothing_in_flight() {
    assert_eq!(status_label(ExchangeStatus::Idle, 0), None);
    assert_eq!(status_label(ExchangeStatus::Succeeded, 0), None);
    assert_eq!(status_label(ExchangeStatus::Failed, 0), None);
}

#[test]
fn status_label_for_single_pending_exchange() {
    assert_eq!(status_label(ExchangeStatus::Pending, 1).as_deref(), Some("Bot is typing..."));
}

#[test]
fn status_label_counts_overlapping_exchanges() {
    assert_eq!(
        status_label(ExchangeStatus::Pending, 3).as_deref(),
        Some("Bot is replying to 3 messages...")
    );
}
