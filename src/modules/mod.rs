pub mod lens;

use lensgram_kernel::settings::Settings;
use lensgram_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    registry.register(lens::create_module(settings)?);
    Ok(())
}
