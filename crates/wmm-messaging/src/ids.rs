//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Identifier and timestamp defaults for outbound messages."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use chrono::Utc;
use rand::Rng;

/// Draw an identifier spanning the full wire width of correlation and event ids.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen()
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

pub(crate) fn resolve_id<R: Rng + ?Sized>(explicit: Option<u64>, rng: &mut R) -> u64 {
    explicit.unwrap_or_else(|| random_id(rng))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn explicit_id_wins_over_generated() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(resolve_id(Some(42), &mut rng), 42);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = random_id(&mut StdRng::seed_from_u64(0xA11CE));
        let second = random_id(&mut StdRng::seed_from_u64(0xA11CE));
        assert_eq!(first, second);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_ms() > 1_577_836_800_000);
    }
}
