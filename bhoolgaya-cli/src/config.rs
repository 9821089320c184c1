use anyhow::{Context, Result};
use bhoolgaya_core::UserSettings;
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_bhoolgaya_home;

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_bhoolgaya_home()?.join("config.toml"))
}

pub fn load_config() -> Result<UserSettings> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(UserSettings::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let settings: UserSettings = toml::from_str(&s).context("parse config.toml")?;
    settings.validate().with_context(|| format!("invalid {}", p.display()))?;
    Ok(settings)
}

pub fn save_config(cfg: &UserSettings) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&UserSettings::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}\n", config_path()?.display());
    println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
