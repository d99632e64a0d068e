//! Bus Status State Machine
//!
//! Table-driven validation of bus operational-status transitions.
//! Every check is a synchronous lookup against the static table; there
//! are no timers and no auto-transitions. The update path invokes
//! [`validate_transition`] with the persisted status before any write,
//! so no status change bypasses the table.

use super::{FleetError, FleetResult};
use shared::models::BusStatus;

/// Legal next states for a given current state, self-transition first.
///
/// RETIRED is terminal except for a single reactivation path back
/// through OUT_OF_SERVICE.
pub fn allowed_transitions(current: BusStatus) -> &'static [BusStatus] {
    use BusStatus::*;
    match current {
        Active => &[
            Active,
            Maintenance,
            Repair,
            OutOfService,
            Reserved,
            InTransit,
            Retired,
        ],
        Maintenance => &[Maintenance, Active, Repair, OutOfService, Retired],
        Repair => &[Repair, Active, Maintenance, OutOfService, Retired],
        OutOfService => &[OutOfService, Active, Maintenance, Repair, Retired],
        Reserved => &[Reserved, Active, InTransit, Maintenance],
        InTransit => &[InTransit, Active, Maintenance, Repair],
        Retired => &[Retired, OutOfService],
    }
}

/// Check a proposed transition against the table. No side effects.
pub fn validate_transition(current: BusStatus, proposed: BusStatus) -> FleetResult<()> {
    if allowed_transitions(current).contains(&proposed) {
        Ok(())
    } else {
        Err(FleetError::InvalidTransition {
            from: current,
            to: proposed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BusStatus::*;

    const ALL: [BusStatus; 7] = [
        Active,
        Maintenance,
        Repair,
        OutOfService,
        Reserved,
        InTransit,
        Retired,
    ];

    #[test]
    fn self_transition_always_allowed() {
        for status in ALL {
            assert!(validate_transition(status, status).is_ok(), "{status}");
        }
    }

    #[test]
    fn validate_matches_table_for_all_pairs() {
        for from in ALL {
            for to in ALL {
                let expected = allowed_transitions(from).contains(&to);
                assert_eq!(
                    validate_transition(from, to).is_ok(),
                    expected,
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn retired_only_reactivates_through_out_of_service() {
        assert!(validate_transition(Retired, OutOfService).is_ok());
        assert!(validate_transition(Retired, Retired).is_ok());
        for to in [Active, Maintenance, Repair, Reserved, InTransit] {
            assert!(validate_transition(Retired, to).is_err(), "RETIRED -> {to}");
        }
        // ...and OUT_OF_SERVICE can go back to ACTIVE
        assert!(validate_transition(OutOfService, Active).is_ok());
    }

    #[test]
    fn reserved_cannot_be_retired_directly() {
        assert!(validate_transition(Reserved, Retired).is_err());
        assert!(validate_transition(Reserved, InTransit).is_ok());
    }

    #[test]
    fn in_transit_cannot_go_out_of_service_directly() {
        assert!(validate_transition(InTransit, OutOfService).is_err());
        assert!(validate_transition(InTransit, Repair).is_ok());
    }

    #[test]
    fn invalid_transition_error_names_both_states() {
        let err = validate_transition(Retired, Active).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("RETIRED"), "{msg}");
        assert!(msg.contains("ACTIVE"), "{msg}");
    }

    #[test]
    fn allowed_list_starts_with_self() {
        for status in ALL {
            assert_eq!(allowed_transitions(status)[0], status, "{status}");
        }
    }
}
