//! End-to-end generation for ds3gen

use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    contract::Contract,
    engine::Engine,
    error::Result,
    render::{write_files, TemplateRenderer, UnitRenderer},
};

/// Main entry point for code generation.
///
/// Returns the written paths, relative to the output directory. Nothing is
/// written when the contract has configuration errors or a unit fails to
/// render.
pub async fn generate(config: &Config) -> Result<Vec<PathBuf>> {
    // 1. Load the contract
    let contract = Contract::from_file(&config.contract_path).await?;

    // 2. Synthesize every unit, failing with the full error list
    let target = config.target_language()?;
    let units = Engine::new(&contract, target)?
        .with_filter(config.operation_filter())
        .run()
        .into_result()?;

    // 3. Render and write
    let renderer = TemplateRenderer::new(target, config.template_dir()).await?;
    let files = renderer.render_all(&units)?;
    write_files(Path::new(&config.output_dir), &files).await?;

    Ok(files.into_iter().map(|f| f.path).collect())
}
