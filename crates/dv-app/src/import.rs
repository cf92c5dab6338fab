//! `datavis import`: run a file through the import wizard

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use dv_core::{EventBus, SourceKind};
use dv_core::events::events::ImportStepChanged;
use dv_data::{ImportConfig, SourceFile};
use dv_import::{parse_column_names, ImportStep, ImportWizard};

use crate::dry_run::DryRunService;

pub struct ImportArgs {
    pub file: PathBuf,
    pub name: String,
    pub kind: Option<SourceKind>,
    pub header_present: bool,
    pub columns: Option<String>,
    pub config: Option<PathBuf>,
}

pub async fn run(args: ImportArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ImportConfig::load(path).await?,
        None => ImportConfig::default(),
    };
    let kind = match args.kind {
        Some(kind) => kind,
        None => SourceKind::from_path(&args.file)
            .with_context(|| format!("cannot tell the source kind of {}; pass --kind", args.file.display()))?,
    };
    let file = SourceFile::from_path(&args.file).await?;

    let events = EventBus::new();
    events.subscribe::<ImportStepChanged, _>(|event| {
        tracing::info!("Step {} -> {}", event.from, event.to);
    });

    let wizard = ImportWizard::new(config, Arc::new(DryRunService), Arc::new(true), events);
    wizard.open()?;
    wizard.set_name(args.name.as_str())?;
    wizard.next()?;
    wizard.select_source_kind(kind)?;
    wizard.next()?;
    wizard.select_file(file)?;
    wizard.set_header_present(args.header_present)?;
    if let Some(columns) = &args.columns {
        wizard.set_manual_column_names(parse_column_names(columns))?;
    }
    wizard.next()?;
    wizard.settle().await;

    let session = wizard.session();
    if let Some(error) = session.last_error {
        bail!(error);
    }
    println!("{}", serde_json::to_string_pretty(&session.tables)?);

    if session.current_step == ImportStep::Configure {
        wizard.next()?;
    }
    wizard.submit()?;
    wizard.settle().await;

    match wizard.session().last_error {
        Some(error) if wizard.is_open() => Err(anyhow!(error)),
        _ => Ok(()),
    }
}
