mod settings_applier;

pub use settings_applier::{LocalApplicationError, SensorSettingsApplier, SettingsApplier};
