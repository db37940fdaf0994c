//! Adversarial flood scenarios: memory stays bounded and legitimate
//! traffic survives.

use std::sync::Arc;

use mesh_admission::{
    AdmissionConfig, AdmissionService, FixedTimeSource, MessageAdmission, MessageKey, NodeId,
    NullSink, RateLimitConfig, TimeSource, TrackerConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn frame(id: u32, from: u32) -> Vec<u8> {
    format!(r#"{{"type":4,"id":{id},"from":{from},"dest":0}}"#).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_flood_cannot_grow_tracker() {
        let time = Arc::new(FixedTimeSource::new(0));
        let mut service = AdmissionService::new(
            AdmissionConfig {
                tracker: TrackerConfig {
                    max_messages: 100,
                    timeout_ms: 60_000,
                },
                rate_limit: RateLimitConfig {
                    max_messages_per_window: usize::MAX,
                    window_ms: 1_000,
                },
                ..AdmissionConfig::default()
            },
            Arc::clone(&time) as Arc<dyn TimeSource>,
            Arc::new(NullSink),
        );

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let id = rng.gen_range(0..500u32);
            let from = rng.gen_range(1..20u32);
            service.admit(&frame(id, from));
            time.advance(1);
            assert!(service.tracked_messages() <= 100);
        }
    }

    #[test]
    fn test_malformed_flood_never_reaches_tracker() {
        let time = Arc::new(FixedTimeSource::new(0));
        let mut service = AdmissionService::new(
            AdmissionConfig::default(),
            Arc::clone(&time) as Arc<dyn TimeSource>,
            Arc::new(NullSink),
        );

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let len = rng.gen_range(1..64usize);
            let garbage: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect();
            let decision = service.admit(&garbage);
            assert!(!decision.is_admitted());
        }
        assert_eq!(service.tracked_messages(), 0);
        assert_eq!(service.stats().rejected, 1_000);
    }

    #[test]
    fn test_single_origin_flood_starves_only_itself() {
        let time = Arc::new(FixedTimeSource::new(0));
        let mut service = AdmissionService::new(
            AdmissionConfig::default(),
            Arc::clone(&time) as Arc<dyn TimeSource>,
            Arc::new(NullSink),
        );

        // Origin 666 floods far past its budget within one window.
        let mut flood_admitted = 0;
        for id in 0..1_000u32 {
            if service.admit(&frame(id, 666)).is_admitted() {
                flood_admitted += 1;
            }
        }
        assert_eq!(flood_admitted, 10);

        // A quiet origin is unaffected in the same window.
        assert!(service.admit(&frame(1, 2)).is_admitted());
    }

    #[test]
    fn test_legitimate_traffic_survives_mixed_flood() {
        let time = Arc::new(FixedTimeSource::new(0));
        let mut service = AdmissionService::new(
            AdmissionConfig {
                tracker: TrackerConfig {
                    max_messages: 200,
                    timeout_ms: 60_000,
                },
                ..AdmissionConfig::default()
            },
            Arc::clone(&time) as Arc<dyn TimeSource>,
            Arc::new(NullSink),
        );

        let mut rng = StdRng::seed_from_u64(23);
        let mut legit_admitted = 0u32;
        for round in 0..200u32 {
            // Attacker: duplicates of a small id set, plus garbage.
            let _ = service.admit(&frame(rng.gen_range(0..5), 666));
            let _ = service.admit(b"][[[garbage");
            // Legitimate node: one fresh message per round, well under
            // its rate budget.
            let decision = service.admit(&frame(round, 4));
            if decision.is_admitted() {
                legit_admitted += 1;
            } else {
                panic!("legitimate message {round} refused: {decision:?}");
            }
            time.advance(120);
        }
        assert_eq!(legit_admitted, 200);
        assert!(service.is_processed(MessageKey::new(199, NodeId::new(4))));
    }
}
