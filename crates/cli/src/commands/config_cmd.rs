//! `chatrag config` — Configuration management commands.

use std::path::Path;

use chatrag_config::AppConfig;

pub fn show(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        AppConfig::load_with_overrides(path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(path: &Path) {
    println!("{}", path.display());
}

pub fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating {}...", path.display());

    match AppConfig::load_with_overrides(path) {
        Ok(config) => {
            let retrieval = &config.retrieval;
            println!("   ✅ Config parsed successfully");
            println!();
            println!(
                "   Chunks:   {} chars, {} overlap, min {}",
                retrieval.chunk_size, retrieval.chunk_overlap, retrieval.min_chunk_len
            );
            println!(
                "   Search:   top {}, recency weight {}",
                retrieval.default_top_k, retrieval.recency_weight
            );
            println!("   Context:  {} chars", retrieval.max_context_chars);
            println!("   Logging:  {}", config.logging.level);
            Ok(())
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            Err(e.into())
        }
    }
}

pub fn init(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    println!("✅ Wrote default config to {}", path.display());
    Ok(())
}
