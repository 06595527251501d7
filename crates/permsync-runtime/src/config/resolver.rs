//! Override layer applied after [`ConfigLoader`](super::ConfigLoader).
//!
//! ```text
//! ConfigLoader.load()  →  PermsyncConfig (files + env)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()   (CLI flags, embedding code)
//!                              │
//!                              ▼
//!                     PermsyncConfig (final)
//! ```

use super::PermsyncConfig;

/// Writes explicitly set values into a loaded configuration.
///
/// Implementors leave fields they have no value for untouched.
pub trait ConfigResolver {
    /// Applies overrides in place.
    fn apply(&self, config: &mut PermsyncConfig);
}

/// Any `Fn(&mut PermsyncConfig)` works as a one-off resolver.
impl<F> ConfigResolver for F
where
    F: Fn(&mut PermsyncConfig),
{
    fn apply(&self, config: &mut PermsyncConfig) {
        self(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingItemPolicy;

    struct DriveOverride(Option<String>);

    impl ConfigResolver for DriveOverride {
        fn apply(&self, config: &mut PermsyncConfig) {
            if let Some(ref drive) = self.0 {
                config.storage.drive_id.clone_from(drive);
            }
        }
    }

    #[test]
    fn unset_override_keeps_loaded_value() {
        let mut config = PermsyncConfig::default();
        config.storage.drive_id = "b!file".into();

        DriveOverride(None).apply(&mut config);
        assert_eq!(config.storage.drive_id, "b!file");

        DriveOverride(Some("b!cli".into())).apply(&mut config);
        assert_eq!(config.storage.drive_id, "b!cli");
    }

    #[test]
    fn closure_resolver() {
        let mut config = PermsyncConfig::default();
        let lenient = |c: &mut PermsyncConfig| {
            c.reconcile.missing_item = MissingItemPolicy::TreatAsEmpty;
        };

        lenient.apply(&mut config);
        assert_eq!(config.reconcile.missing_item, MissingItemPolicy::TreatAsEmpty);
    }
}
