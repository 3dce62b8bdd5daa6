use clom_core::Registry;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: clom-demo [name NAME] [height FEET] [--smart] [--json]";

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), String> {
    let mut registry = build_registry().map_err(|e| e.to_string())?;

    // Rejected command lines print the diagnostic and usage, then exit 1.
    registry.process_env_or_exit();
    tracing::debug!(
        settings = registry.settings().count(),
        flags = registry.flags().count(),
        "command line accepted"
    );

    if registry.is_flag_set("--json").map_err(|e| e.to_string())? {
        let json = serde_json::to_string_pretty(&registry).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!("{}", describe(&registry).map_err(|e| e.to_string())?);
    }
    Ok(())
}

fn build_registry() -> clom_core::Result<Registry> {
    let mut registry = Registry::new().with_hint(USAGE);
    registry.register_setting("name", "Mr X")?;
    registry.register_setting("height", 6.0f32)?;
    registry.register_flag("--smart")?;
    registry.register_flag("--json")?;
    Ok(registry)
}

fn describe(registry: &Registry) -> clom_core::Result<String> {
    let name = registry.get_setting_value::<String>("name")?;
    let height = registry.get_setting_value::<f32>("height")?;
    let smart = if registry.is_flag_set("--smart")? {
        "smart."
    } else {
        "not smart."
    };
    Ok(format!("{name} is {height} foot tall and is {smart}"))
}
