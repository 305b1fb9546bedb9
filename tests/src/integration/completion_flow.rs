//! # Completion Workflow Integration
//!
//! Drives the registry the way a caller does: string operation names and
//! string arguments through `dispatch`, asserting on the wire payloads and
//! the resulting ledger state.

#[cfg(test)]
mod tests {
    use construction_registry::{
        AbsentEndorsementPolicy, RegistryConfig, RegistryError, RegistryService,
    };
    use ledger_store::{InMemoryLedger, LedgerStore};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A seeded registry with the source-compatible absence policy, so the
    /// flows that predate endorsements still run.
    fn seeded() -> RegistryService<InMemoryLedger> {
        init_logging();
        let config = RegistryConfig::new()
            .with_absent_endorsement(AbsentEndorsementPolicy::TreatAsEndorsed);
        let mut svc = RegistryService::new(InMemoryLedger::new(), config);
        svc.dispatch("initLedger", &[]).unwrap();
        svc
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn home_status(svc: &mut RegistryService<InMemoryLedger>, id: &str) -> String {
        let bytes = svc.dispatch("queryHome", &args(&[id])).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["buildStatus"].as_str().unwrap().to_string()
    }

    fn tower_json(svc: &RegistryService<InMemoryLedger>, id: &str) -> serde_json::Value {
        let bytes = svc
            .ledger()
            .get(&format!("tower:{id}"))
            .unwrap()
            .expect("tower record");
        serde_json::from_slice(&bytes).unwrap()
    }

    // =========================================================================
    // SCENARIO: TWO TOWERS, ONE VERIFIED FLOOR
    // =========================================================================

    /// Seed two towers with four homes each, verify floor 1 of tower A after
    /// an OK endorsement, and check exactly the four "A" homes changed.
    #[test]
    fn test_two_tower_cascade_touches_only_the_verified_tower() {
        let mut svc = seeded();

        svc.dispatch("notifyFloorCompletion", &args(&["A", "1"]))
            .unwrap();
        assert_eq!(tower_json(&svc, "A")["buildStatus"], "COM");

        svc.dispatch("verifyFloorCompletion", &args(&["A", "1", "OK"]))
            .unwrap();
        svc.dispatch("obtainCompletionVerification", &args(&["A", "1"]))
            .unwrap();

        let tower = tower_json(&svc, "A");
        assert_eq!(tower["buildStatus"], "VER");
        assert_eq!(tower["completedFloor"], 1);

        for id in ["101", "102", "103", "104"] {
            assert_eq!(home_status(&mut svc, id), "Floor 1 Completed");
        }
        for id in ["201", "202", "203"] {
            assert_eq!(home_status(&mut svc, id), "Booked");
        }
        assert_eq!(tower_json(&svc, "B")["buildStatus"], "NS");
    }

    #[test]
    fn test_nok_gate_blocks_and_leaves_everything_unchanged() {
        let mut svc = seeded();

        svc.dispatch("notifyFloorCompletion", &args(&["B", "1"]))
            .unwrap();
        svc.dispatch("verifyFloorCompletion", &args(&["B", "1", "NOK"]))
            .unwrap();
        let before = svc.dispatch("queryAllHomes", &[]).unwrap();

        let err = svc
            .dispatch("obtainCompletionVerification", &args(&["B", "1"]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::VerificationRejected { floor: 1 }));

        assert_eq!(tower_json(&svc, "B")["buildStatus"], "COM");
        assert_eq!(svc.dispatch("queryAllHomes", &[]).unwrap(), before);
    }

    #[test]
    fn test_reendorsement_after_rejection_unblocks() {
        let mut svc = seeded();

        svc.dispatch("notifyFloorCompletion", &args(&["A", "2"]))
            .unwrap();
        svc.dispatch("verifyFloorCompletion", &args(&["A", "2", "NOK"]))
            .unwrap();
        assert!(svc
            .dispatch("obtainCompletionVerification", &args(&["A", "2"]))
            .is_err());

        // The bank re-inspects and endorses.
        svc.dispatch("verifyFloorCompletion", &args(&["A", "2", "OK"]))
            .unwrap();
        svc.dispatch("obtainCompletionVerification", &args(&["A", "2"]))
            .unwrap();
        assert_eq!(tower_json(&svc, "A")["buildStatus"], "VER");
        assert_eq!(home_status(&mut svc, "104"), "Floor 2 Completed");
    }

    // =========================================================================
    // FULL LIFECYCLE: CREATE, BOOK, VERIFY FLOOR
    // =========================================================================

    #[test]
    fn test_new_home_rides_the_next_cascade() {
        let mut svc = seeded();

        svc.dispatch("createHome", &args(&["105", "A", "1"])).unwrap();
        svc.dispatch(
            "changeHomeOwnership",
            &args(&["105", "customer.105@example.com"]),
        )
        .unwrap();
        assert_eq!(home_status(&mut svc, "105"), "Booked");

        svc.dispatch("notifyFloorCompletion", &args(&["A", "1"]))
            .unwrap();
        svc.dispatch("verifyFloorCompletion", &args(&["A", "1", "OK"]))
            .unwrap();
        svc.dispatch("obtainCompletionVerification", &args(&["A", "1"]))
            .unwrap();

        assert_eq!(home_status(&mut svc, "105"), "Floor 1 Completed");

        let bytes = svc.dispatch("queryHome", &args(&["105"])).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["customer"], "customer.105@example.com");
        assert_eq!(json["builderPerc"], 100);
        assert_eq!(json["customerPerc"], 0);
    }

    #[test]
    fn test_query_all_homes_includes_created_home_in_key_order() {
        let mut svc = seeded();
        svc.dispatch("createHome", &args(&["150", "C", "3"])).unwrap();

        let bytes = svc.dispatch("queryAllHomes", &[]).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r["Key"].as_str().unwrap()).collect();
        assert_eq!(
            keys,
            vec!["101", "102", "103", "104", "150", "201", "202", "203", "204"]
        );
    }

    // =========================================================================
    // STRICT ENDORSEMENT POLICY
    // =========================================================================

    #[test]
    fn test_strict_policy_requires_a_recorded_endorsement() {
        init_logging();
        let mut svc =
            RegistryService::new(InMemoryLedger::new(), RegistryConfig::default());
        svc.dispatch("initLedger", &[]).unwrap();
        svc.dispatch("notifyFloorCompletion", &args(&["A", "1"]))
            .unwrap();

        let err = svc
            .dispatch("obtainCompletionVerification", &args(&["A", "1"]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::EndorsementMissing { floor: 1 }));

        svc.dispatch("verifyFloorCompletion", &args(&["A", "1", "OK"]))
            .unwrap();
        svc.dispatch("obtainCompletionVerification", &args(&["A", "1"]))
            .unwrap();
        assert_eq!(tower_json(&svc, "A")["buildStatus"], "VER");
    }

    // =========================================================================
    // MULTI-BANK KEYING
    // =========================================================================

    #[test]
    fn test_gate_only_consults_the_configured_bank() {
        init_logging();
        let config = RegistryConfig::new().with_endorsing_bank("bank2");
        let mut svc = RegistryService::new(InMemoryLedger::new(), config);
        svc.dispatch("initLedger", &[]).unwrap();
        svc.dispatch("notifyFloorCompletion", &args(&["A", "1"]))
            .unwrap();

        // bank2's endorsement lands under its own composite key.
        svc.dispatch("verifyFloorCompletion", &args(&["A", "1", "OK"]))
            .unwrap();
        assert!(svc
            .ledger()
            .get("endorsement~A~1~bank2")
            .unwrap()
            .is_some());
        assert!(svc
            .ledger()
            .get("endorsement~A~1~bank1")
            .unwrap()
            .is_none());

        svc.dispatch("obtainCompletionVerification", &args(&["A", "1"]))
            .unwrap();
        assert_eq!(tower_json(&svc, "A")["buildStatus"], "VER");
    }
}
