//! `datavis identify`: pick a visualization for a saved query result

use std::path::PathBuf;

use anyhow::{Context, Result};
use dv_core::QueryResult;
use dv_views::{plan, AxisOverrides};

pub struct IdentifyArgs {
    pub file: PathBuf,
    pub category: Option<String>,
    pub value: Option<String>,
    pub line_x: Option<String>,
}

pub async fn run(args: IdentifyArgs) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let result: QueryResult = serde_json::from_str(&text)?;
    result.validate()?;

    let overrides = AxisOverrides {
        category: args.category,
        value: args.value,
        line_x: args.line_x,
    };
    let plan = plan(&result, &overrides);
    tracing::info!("Selected {} for {}", plan.kind(), args.file.display());
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
