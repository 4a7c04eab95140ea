use std::path::Path;

use reactive_mysql_config::RuntimeConfig;

pub fn resolve(config_path: &Path, datasource: Option<&str>, event_loops: Option<i32>) -> anyhow::Result<()> {
    let config = RuntimeConfig::from_file(config_path)?;
    let recorder = super::recorder();
    let event_loops = Some(super::event_loop_count(event_loops));

    let names = match datasource {
        Some(name) => vec![name.to_string()],
        None => config.data_source_names(),
    };

    let resolved = names
        .iter()
        .map(|name| recorder.resolve(name, &config, event_loops))
        .collect::<Result<Vec<_>, _>>()?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
