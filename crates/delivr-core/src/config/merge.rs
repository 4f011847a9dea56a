//! Configuration layer merging logic
//!
//! Global -> Project; a value set in a later layer replaces the earlier one.

use super::schema::DelivrConfig;

/// Merge configuration layers
///
/// # Arguments
/// * `global` - Global configuration from ~/.config/delivr/delivr.toml
/// * `project` - Project configuration from ./delivr.toml
pub fn merge_configs(global: Option<DelivrConfig>, project: Option<DelivrConfig>) -> DelivrConfig {
    let mut merged = global.unwrap_or_default();
    if let Some(project) = project {
        merge_layer(&mut merged, project);
    }
    merged
}

fn merge_layer(base: &mut DelivrConfig, layer: DelivrConfig) {
    if layer.cdn_host.is_some() {
        base.cdn_host = layer.cdn_host;
    }
}
