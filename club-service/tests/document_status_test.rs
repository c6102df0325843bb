//! Document status vocabulary and transition tests.

use club_service::models::{DocumentStatus, DocumentType};

#[test]
fn quote_vocabulary() {
    assert!(DocumentStatus::Draft.valid_for(DocumentType::Quote));
    assert!(DocumentStatus::Sent.valid_for(DocumentType::Quote));
    assert!(DocumentStatus::Accepted.valid_for(DocumentType::Quote));
    assert!(DocumentStatus::Refused.valid_for(DocumentType::Quote));

    assert!(!DocumentStatus::Paid.valid_for(DocumentType::Quote));
    assert!(!DocumentStatus::Overdue.valid_for(DocumentType::Quote));
}

#[test]
fn invoice_vocabulary() {
    assert!(DocumentStatus::Draft.valid_for(DocumentType::Invoice));
    assert!(DocumentStatus::Sent.valid_for(DocumentType::Invoice));
    assert!(DocumentStatus::Paid.valid_for(DocumentType::Invoice));
    assert!(DocumentStatus::Overdue.valid_for(DocumentType::Invoice));

    assert!(!DocumentStatus::Accepted.valid_for(DocumentType::Invoice));
    assert!(!DocumentStatus::Refused.valid_for(DocumentType::Invoice));
}

#[test]
fn statuses_only_move_forward() {
    assert!(DocumentStatus::Draft.can_transition_to(DocumentStatus::Sent));
    assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Accepted));
    assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Refused));
    assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Paid));
    assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Overdue));
    assert!(DocumentStatus::Overdue.can_transition_to(DocumentStatus::Paid));

    // No skipping draft, no reverting.
    assert!(!DocumentStatus::Draft.can_transition_to(DocumentStatus::Paid));
    assert!(!DocumentStatus::Draft.can_transition_to(DocumentStatus::Accepted));
    assert!(!DocumentStatus::Sent.can_transition_to(DocumentStatus::Draft));
    assert!(!DocumentStatus::Paid.can_transition_to(DocumentStatus::Sent));
    assert!(!DocumentStatus::Accepted.can_transition_to(DocumentStatus::Refused));
}

#[test]
fn terminal_statuses_stay_terminal() {
    let terminal = [
        DocumentStatus::Accepted,
        DocumentStatus::Refused,
        DocumentStatus::Paid,
    ];
    let all = [
        DocumentStatus::Draft,
        DocumentStatus::Sent,
        DocumentStatus::Accepted,
        DocumentStatus::Refused,
        DocumentStatus::Paid,
        DocumentStatus::Overdue,
    ];

    for from in terminal {
        for to in all {
            assert!(
                !from.can_transition_to(to),
                "{} -> {} should be rejected",
                from.as_str(),
                to.as_str()
            );
        }
    }
}

#[test]
fn status_string_round_trip() {
    let all = [
        DocumentStatus::Draft,
        DocumentStatus::Sent,
        DocumentStatus::Accepted,
        DocumentStatus::Refused,
        DocumentStatus::Paid,
        DocumentStatus::Overdue,
    ];
    for status in all {
        assert_eq!(DocumentStatus::from_string(status.as_str()), status);
    }
    // Unknown storage values fall back to draft rather than failing a read.
    assert_eq!(DocumentStatus::from_string("garbage"), DocumentStatus::Draft);
}

#[test]
fn type_string_round_trip() {
    assert_eq!(DocumentType::from_string("quote"), DocumentType::Quote);
    assert_eq!(DocumentType::from_string("invoice"), DocumentType::Invoice);
    assert_eq!(DocumentType::from_string("other"), DocumentType::Quote);
}
