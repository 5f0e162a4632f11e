//! Configuration loader and validator.
//!
//! Sources, later ones winning:
//! 1. defaults ([`FlattenConfig::default`]);
//! 2. YAML file named by `FLATTEN_CONFIG`;
//! 3. env vars `FLATTEN_INPUT`, `FLATTEN_OUTPUT_DIR`, `FLATTEN_COMPRESSION`, `FLATTEN_ID_CACHE`;
//! 4. positional arguments `[INPUT] [OUTPUT_DIR]`.
//!
//! The result is validated before it is returned.

pub mod model;

use crate::config::model::FlattenConfig;
use crate::errors::{FlattenError, Result};
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;

pub const ENV_CONFIG_FILE: &str = "FLATTEN_CONFIG";
pub const ENV_INPUT: &str = "FLATTEN_INPUT";
pub const ENV_OUTPUT_DIR: &str = "FLATTEN_OUTPUT_DIR";
pub const ENV_COMPRESSION: &str = "FLATTEN_COMPRESSION";
pub const ENV_ID_CACHE: &str = "FLATTEN_ID_CACHE";

/// Load from the process environment and `args` (program name excluded).
pub fn load(args: &[String]) -> Result<FlattenConfig> {
    load_with(|key| std::env::var(key).ok(), args)
}

/// Same as [`load`] with an injectable env lookup.
pub fn load_with<F>(env: F, args: &[String]) -> Result<FlattenConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match env(ENV_CONFIG_FILE).filter(|p| !p.trim().is_empty()) {
        Some(path) => from_yaml_file(Path::new(&path))?,
        None => FlattenConfig::default(),
    };

    apply_env(&mut cfg, &env)?;
    apply_args(&mut cfg, args)?;
    cfg.validate()?;

    debug!(
        input = %cfg.io.input_path.display(),
        output_dir = %cfg.io.output_dir.display(),
        compression = %cfg.output.compression,
        id_cache = cfg.ids.cache,
        "configuration loaded"
    );
    Ok(cfg)
}

/// Read a YAML config file; missing keys fall back to defaults.
pub fn from_yaml_file(path: &Path) -> Result<FlattenConfig> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yml::from_str(&text)?)
}

fn apply_env<F>(cfg: &mut FlattenConfig, env: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = env(ENV_INPUT) {
        cfg.io.input_path = PathBuf::from(v);
    }
    if let Some(v) = env(ENV_OUTPUT_DIR) {
        cfg.io.output_dir = PathBuf::from(v);
    }
    if let Some(v) = env(ENV_COMPRESSION) {
        cfg.output.compression = v.parse()?;
    }
    if let Some(v) = env(ENV_ID_CACHE) {
        cfg.ids.cache = parse_bool(ENV_ID_CACHE, &v)?;
    }
    Ok(())
}

fn apply_args(cfg: &mut FlattenConfig, args: &[String]) -> Result<()> {
    match args {
        [] => {}
        [input] => cfg.io.input_path = PathBuf::from(input),
        [input, output] => {
            cfg.io.input_path = PathBuf::from(input);
            cfg.io.output_dir = PathBuf::from(output);
        }
        [_, _, extra, ..] => {
            return Err(FlattenError::Config(format!(
                "unexpected argument `{extra}` (usage: [INPUT] [OUTPUT_DIR])"
            )));
        }
    }
    Ok(())
}

fn parse_bool(key: &str, v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(FlattenError::Config(format!("`{key}` is not a boolean: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ParquetCompression;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env_or_args() {
        let cfg = load_with(env_of(&[]), &[]).unwrap();
        assert_eq!(cfg, FlattenConfig::default());
    }

    #[test]
    fn env_then_args_override() {
        let env = env_of(&[
            (ENV_INPUT, "env.xml"),
            (ENV_OUTPUT_DIR, "env_out"),
            (ENV_COMPRESSION, "gzip"),
            (ENV_ID_CACHE, "off"),
        ]);
        let cfg = load_with(env, &["arg.xml".to_string()]).unwrap();
        assert_eq!(cfg.io.input_path, PathBuf::from("arg.xml"));
        assert_eq!(cfg.io.output_dir, PathBuf::from("env_out"));
        assert_eq!(cfg.output.compression, ParquetCompression::Gzip);
        assert!(!cfg.ids.cache);
    }

    #[test]
    fn yaml_file_is_merged_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flatten.yml");
        fs::write(
            &path,
            "io:\n  output_dir: yaml_out\noutput:\n  compression: zstd\n",
        )
        .unwrap();
        let path_str = path.to_string_lossy().into_owned();
        let cfg = load_with(env_of(&[(ENV_CONFIG_FILE, path_str.as_str())]), &[]).unwrap();

        assert_eq!(cfg.io.output_dir, PathBuf::from("yaml_out"));
        assert_eq!(cfg.io.input_path, PathBuf::from("sample/data.xml"));
        assert_eq!(cfg.output.compression, ParquetCompression::Zstd);
        assert!(cfg.output.write_summary);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load_with(env_of(&[(ENV_ID_CACHE, "maybe")]), &[]).is_err());
        assert!(load_with(env_of(&[(ENV_COMPRESSION, "lz4")]), &[]).is_err());
        let args: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            load_with(env_of(&[]), &args),
            Err(FlattenError::Config(_))
        ));
    }
}
