use crate::core::provisioner::AssetProvisioner;
use crate::core::registry::{DataContext, DataProvidersManager, DirectoryCrawler};
use crate::core::{AppContext, InitOutcome};
use crate::utils::error::Result;
use std::sync::Arc;

pub const DEFAULT_ASSET_ROOT: &str = "orekit-data";
pub const DEFAULT_DATA_DIR_NAME: &str = "orekit-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Path of the data tree inside the asset bundle.
    pub asset_root: String,
    /// Directory created under the context's files dir.
    pub data_dir_name: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            data_dir_name: DEFAULT_DATA_DIR_NAME.to_string(),
        }
    }
}

pub struct OrbitDataInitializer<'m> {
    options: InitOptions,
    manager: &'m DataProvidersManager,
}

impl OrbitDataInitializer<'static> {
    /// Initializer registering into the process-wide provider manager.
    pub fn with_global_manager(options: InitOptions) -> Self {
        Self::new(options, DataContext::global().providers_manager())
    }
}

impl<'m> OrbitDataInitializer<'m> {
    pub fn new(options: InitOptions, manager: &'m DataProvidersManager) -> Self {
        Self { options, manager }
    }

    pub fn options(&self) -> &InitOptions {
        &self.options
    }

    /// Provisions `<files_dir>/<data_dir_name>` from the bundled assets and
    /// registers it with the provider manager.
    pub fn run(&self, ctx: &dyn AppContext) -> Result<InitOutcome> {
        let data_dir = ctx.files_dir().join(&self.options.data_dir_name);

        let provision =
            AssetProvisioner::new(ctx.assets()).provision(&self.options.asset_root, &data_dir)?;
        if provision.copied {
            tracing::info!("Copied orbit data to: {}", data_dir.display());
        }

        let crawler = DirectoryCrawler::new(&data_dir)?;
        self.manager.add_provider(Arc::new(crawler));
        tracing::info!("Orbit data loaded successfully");

        Ok(InitOutcome {
            data_dir,
            provision,
            providers_registered: self.manager.providers_count(),
        })
    }
}

/// Best-effort startup hook: provisions and registers the orbit data with
/// default options. Failures are logged and never reach the caller.
pub fn init_orbit_data(ctx: &dyn AppContext) {
    init_orbit_data_with(ctx, InitOptions::default());
}

pub fn init_orbit_data_with(ctx: &dyn AppContext, options: InitOptions) {
    if let Err(e) = try_init_orbit_data(ctx, options) {
        tracing::error!(
            "Orbit data initialization failed: {} (severity: {:?})",
            e,
            e.severity()
        );
    }
}

/// Same work as [`init_orbit_data_with`] against the global manager, but the
/// error is returned to the caller instead of being logged.
pub fn try_init_orbit_data(ctx: &dyn AppContext, options: InitOptions) -> Result<InitOutcome> {
    OrbitDataInitializer::with_global_manager(options).run(ctx)
}
